// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Yearly contribution summary ("wrapped") model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Maximum number of repositories kept in `top_repos`.
pub const TOP_REPOS_LIMIT: usize = 8;
/// Maximum number of languages kept in `top_languages`.
pub const TOP_LANGUAGES_LIMIT: usize = 6;

/// Everything the slideshow needs for one user and one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ContributionSummary {
    pub year: i32,
    pub profile: Profile,
    pub totals: Totals,
    /// Sorted by contributions, descending
    pub top_repos: Vec<TopRepo>,
    /// Sorted by bytes, descending
    pub top_languages: Vec<TopLanguage>,
    pub fun: Fun,
    pub generated_at: DateTime<Utc>,
}

/// Identity snapshot taken at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Yearly counters.
///
/// `active_days` and `repo_count` stay `None` until something computes
/// them. `contributions` is `None` only when GitHub omitted the calendar
/// total; enrichment always fills it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Totals {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub commits: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub prs: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub issues: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | undefined"))]
    pub contributions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | undefined"))]
    pub active_days: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | undefined"))]
    pub repo_count: Option<u64>,
}

/// A repository and its summed contributions across all activity kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TopRepo {
    /// "owner/repo", unique within a summary
    pub name_with_owner: String,
    pub url: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub contributions: u64,
}

/// A language and its share of bytes across the top repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TopLanguage {
    pub name: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub bytes: u64,
    /// Percentage of all merged bytes, in [0, 100]
    pub pct: f64,
}

/// Slideshow trivia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Fun {
    /// English month name, e.g. "March"
    pub best_month: String,
    /// Three-letter weekday, e.g. "Tue"
    pub best_weekday: String,
    pub badge: Badge,
}

/// Which activity kind dominated the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Badge {
    #[serde(rename = "PR Machine")]
    PrMachine,
    #[serde(rename = "Commit Captain")]
    CommitCaptain,
    #[serde(rename = "Issue Hunter")]
    IssueHunter,
    #[serde(rename = "Balanced Builder")]
    BalancedBuilder,
}

impl Badge {
    /// Pick the badge from the three yearly totals.
    ///
    /// A kind wins only if it is strictly greater than both others. Checked
    /// in the order PRs, commits, issues.
    pub fn from_totals(commits: u64, prs: u64, issues: u64) -> Self {
        if prs > commits && prs > issues {
            Badge::PrMachine
        } else if commits > prs && commits > issues {
            Badge::CommitCaptain
        } else if issues > prs && issues > commits {
            Badge::IssueHunter
        } else {
            Badge::BalancedBuilder
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Badge::PrMachine => "PR Machine",
            Badge::CommitCaptain => "Commit Captain",
            Badge::IssueHunter => "Issue Hunter",
            Badge::BalancedBuilder => "Balanced Builder",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
