// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregator;
pub mod enrich;
pub mod github;
pub mod merge;
pub mod wrapped_id;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregator::{aggregate, AggregateOptions};
pub use enrich::enrich;
pub use github::{ContributionSource, GitHubClient, Viewer};
pub use wrapped_id::wrapped_id;
