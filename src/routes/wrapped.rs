// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wrapped generation and sharing routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::{bearer_token, require_auth, resolve_user, AuthUser};
use crate::models::{WrappedRecord, WrappedResponse};
use crate::services::wrapped_id::is_well_formed;
use crate::services::{aggregate, enrich, wrapped_id, AggregateOptions};
use crate::time_utils::current_year;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// First year GitHub has contribution data for.
pub const MIN_YEAR: i32 = 2008;
pub const MAX_YEAR: i32 = 2100;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/api/wrapped/generate", post(generate_wrapped))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/api/wrapped/{id}", get(get_wrapped))
        .merge(protected)
}

// ─── Generate ────────────────────────────────────────────────

/// Body of `POST /api/wrapped/generate`. Every field is optional.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GenerateRequest {
    #[validate(range(min = MIN_YEAR, max = MAX_YEAR))]
    pub year: Option<i32>,
    pub is_public: Option<bool>,
}

impl GenerateRequest {
    /// Parse a request body; an empty or malformed body means all defaults.
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Ignoring unparseable generate body");
            Self::default()
        })
    }

    /// The requested year, defaulting to the current one.
    pub fn resolve_year(&self, current_year: i32) -> Result<i32> {
        self.validate()
            .map_err(|e| AppError::BadRequest(format!("invalid year: {}", e)))?;

        let year = self.year.unwrap_or(current_year);
        if year > current_year {
            return Err(AppError::BadRequest(format!(
                "year {} is in the future",
                year
            )));
        }
        Ok(year)
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GenerateResponse {
    pub id: String,
}

/// Aggregate, enrich and store the caller's wrapped for one year.
///
/// Nothing is written unless aggregation succeeds.
async fn generate_wrapped(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<Json<GenerateResponse>> {
    let request = GenerateRequest::from_body(&body);
    let year = request.resolve_year(current_year())?;
    let is_public = request.is_public.unwrap_or(true);

    tracing::info!(user_id = user.user_id, year, is_public, "Generating wrapped");

    let options = AggregateOptions::from_config(&state.config);
    let draft = aggregate(&state.github, &user.token, year, &options).await?;
    let summary = enrich(draft, &state.github, &user.token, year).await;

    let id = wrapped_id(&state.config.wrapped_id_key, user.user_id, year)?;
    let now = Utc::now();
    let record = WrappedRecord {
        id,
        user_id: user.user_id,
        year,
        is_public,
        data: summary,
        created_at: now,
        updated_at: now,
    };

    let stored = state.db.upsert_wrapped(&record).await?;

    tracing::info!(
        user_id = user.user_id,
        year,
        id = %stored.id,
        "Wrapped stored"
    );

    Ok(Json(GenerateResponse { id: stored.id }))
}

// ─── Read ────────────────────────────────────────────────────

/// Fetch a stored wrapped by id.
///
/// Public records are readable by anyone; private ones only by their owner.
async fn get_wrapped(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<WrappedResponse>> {
    if !is_well_formed(&id) {
        return Err(AppError::NotFound(format!("wrapped {}", id)));
    }

    let record = state
        .db
        .get_wrapped(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("wrapped {}", id)))?;

    if !record.is_public {
        let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
        let viewer = resolve_user(&state, token)
            .await
            .map_err(AppError::on_read_path)?;
        if !record.visible_to(Some(viewer.user_id)) {
            tracing::debug!(id = %id, viewer = viewer.user_id, "Private wrapped refused");
            return Err(AppError::Forbidden("this wrapped is private".to_string()));
        }
    }

    Ok(Json(record.into()))
}
