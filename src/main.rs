// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! gh-wrapped API Server
//!
//! Generates yearly GitHub contribution summaries for the caller and serves
//! stored summaries by share id.

use gh_wrapped::{
    config::{Config, StoreBackend},
    db::WrappedDb,
    services::GitHubClient,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting gh-wrapped API");

    let db = match config.store_backend {
        StoreBackend::Firestore => WrappedDb::new(&config.gcp_project_id).await?,
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory wrapped store; records are lost on restart");
            WrappedDb::new_memory()
        }
    };

    let github = GitHubClient::new(config.github_api_url.clone())?;
    tracing::info!(
        api_url = %config.github_api_url,
        concurrency = config.language_fetch_concurrency,
        policy = ?config.language_failure_policy,
        "GitHub client initialized"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        github,
    });

    let app = gh_wrapped::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gh_wrapped=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
