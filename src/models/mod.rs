// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod summary;
pub mod wrapped;

pub use summary::{
    Badge, ContributionSummary, Fun, Profile, TopLanguage, TopRepo, Totals, TOP_LANGUAGES_LIMIT,
    TOP_REPOS_LIMIT,
};
pub use wrapped::{WrappedRecord, WrappedResponse};
