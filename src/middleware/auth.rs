// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub bearer credential authentication middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated GitHub user, resolved from the bearer credential.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub login: String,
    /// The caller's GitHub token, reused for the contribution queries
    pub token: String,
}

/// Bearer token from the `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve a bearer token to the GitHub user it belongs to.
///
/// A token GitHub rejects is reported as `Unauthorized`.
pub async fn resolve_user(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let viewer = state.github.get_viewer(token).await.map_err(|e| {
        if e.is_bad_credentials() {
            AppError::Unauthorized
        } else {
            e
        }
    })?;

    Ok(AuthUser {
        user_id: viewer.id,
        login: viewer.login,
        token: token.to_string(),
    })
}

/// Middleware that requires a valid GitHub credential.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let auth_user = resolve_user(&state, &token).await?;
    tracing::debug!(user_id = auth_user.user_id, login = %auth_user.login, "Authenticated");

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer gho_abc")), Some("gho_abc"));
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
