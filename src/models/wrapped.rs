// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Stored wrapped record and its API shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::ContributionSummary;

/// Stored wrapped record in Firestore.
///
/// One per `(user_id, year)`; `id` is derived from that pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedRecord {
    /// Share id (also used as document ID)
    pub id: String,
    /// GitHub user ID of the owner
    pub user_id: u64,
    pub year: i32,
    /// Readable by anyone holding the id when true
    pub is_public: bool,
    pub data: ContributionSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WrappedRecord {
    /// Whether `viewer` (if any) may read this record.
    pub fn visible_to(&self, viewer: Option<u64>) -> bool {
        self.is_public || viewer == Some(self.user_id)
    }
}

/// Wrapped record as returned by `GET /api/wrapped/{id}`.
///
/// Record metadata sits next to the summary fields at the top level.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WrappedResponse {
    pub id: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    #[cfg_attr(feature = "binding-generation", ts(flatten))]
    pub summary: ContributionSummary,
}

impl From<WrappedRecord> for WrappedResponse {
    fn from(record: WrappedRecord) -> Self {
        Self {
            id: record.id,
            is_public: record.is_public,
            created_at: record.created_at,
            updated_at: record.updated_at,
            summary: record.data,
        }
    }
}
