// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! gh-wrapped: a yearly "wrapped" summary of a GitHub user's contributions
//!
//! This crate provides the backend API that aggregates a year of GitHub
//! activity into a shareable summary and stores it under a stable id.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::WrappedDb;
use services::GitHubClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: WrappedDb,
    pub github: GitHubClient,
}
