// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-effort enrichment of a freshly aggregated summary.
//!
//! Adds the number of active days (from a separate calendar query) and the
//! number of repositories touched. Never fails: a broken calendar query
//! degrades to zero active days.

use std::collections::HashSet;

use crate::models::{ContributionSummary, Totals};
use crate::services::github::{CalendarDays, ContributionSource};
use crate::time_utils::year_range;

/// Fill the enrichment fields of `draft` and normalize its totals.
pub async fn enrich<S: ContributionSource>(
    mut draft: ContributionSummary,
    source: &S,
    token: &str,
    year: i32,
) -> ContributionSummary {
    let (from, to) = year_range(year);

    let active_days = match source.fetch_calendar(token, &from, &to).await {
        Ok(calendar) => count_active_days(&calendar),
        Err(e) => {
            tracing::warn!(year, error = %e, "Active days query failed, defaulting to 0");
            0
        }
    };

    let repo_count = draft
        .top_repos
        .iter()
        .map(|r| r.name_with_owner.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;

    merge_enrichment(&mut draft.totals, active_days, repo_count);

    tracing::debug!(
        year,
        active_days = ?draft.totals.active_days,
        repo_count = ?draft.totals.repo_count,
        "Enriched summary"
    );

    draft
}

/// Number of days with at least one contribution.
pub fn count_active_days(calendar: &CalendarDays) -> u64 {
    calendar
        .days()
        .filter(|day| day.contribution_count > 0)
        .count() as u64
}

/// Apply computed values without clobbering ones already set.
///
/// A stored `Some(0)` counts as unset, same as `None`.
pub fn merge_enrichment(totals: &mut Totals, active_days: u64, repo_count: u64) {
    fill_if_missing(&mut totals.active_days, active_days);
    fill_if_missing(&mut totals.repo_count, repo_count);

    if totals.contributions.is_none() {
        totals.contributions = Some(totals.commits);
    }
}

fn fill_if_missing(slot: &mut Option<u64>, value: u64) {
    if matches!(slot, None | Some(0)) {
        *slot = Some(value);
    }
}
