// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local wrapped store for tests and local runs.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::WrappedRecord;

#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<String, WrappedRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_wrapped(&self, id: &str) -> Option<WrappedRecord> {
        self.records.get(id).map(|r| r.value().clone())
    }

    /// Insert or replace under the record's id, keeping the first `created_at`.
    pub fn upsert_wrapped(&self, record: &WrappedRecord) -> WrappedRecord {
        let mut stored = record.clone();
        match self.records.entry(record.id.clone()) {
            Entry::Occupied(mut slot) => {
                stored.created_at = slot.get().created_at;
                slot.insert(stored.clone());
            }
            Entry::Vacant(slot) => {
                slot.insert(stored.clone());
            }
        }
        stored
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
