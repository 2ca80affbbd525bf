// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process `ContributionSource` for unit tests.

use crate::error::AppError;
use crate::services::github::{ActivityReport, CalendarDays, ContributionSource, LanguageBytes};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned GitHub responses keyed the way the real client is called.
#[derive(Default)]
pub struct FakeSource {
    pub activity: Option<serde_json::Value>,
    /// "owner/repo" -> languages, or an error message
    pub languages: HashMap<String, Result<Vec<(&'static str, u64)>, String>>,
    pub calendar: Option<Result<serde_json::Value, String>>,
    pub language_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_activity(activity: serde_json::Value) -> Self {
        Self {
            activity: Some(activity),
            ..Default::default()
        }
    }

    pub fn language(mut self, repo: &str, langs: Vec<(&'static str, u64)>) -> Self {
        self.languages.insert(repo.to_string(), Ok(langs));
        self
    }

    pub fn failing_language(mut self, repo: &str) -> Self {
        self.languages
            .insert(repo.to_string(), Err("HTTP 404 Not Found".to_string()));
        self
    }

    pub fn calendar(mut self, calendar: serde_json::Value) -> Self {
        self.calendar = Some(Ok(calendar));
        self
    }

    pub fn failing_calendar(mut self) -> Self {
        self.calendar = Some(Err("HTTP 502 Bad Gateway".to_string()));
        self
    }
}

impl ContributionSource for FakeSource {
    async fn fetch_activity(
        &self,
        _token: &str,
        _from: &str,
        _to: &str,
    ) -> Result<ActivityReport, AppError> {
        let value = self
            .activity
            .clone()
            .ok_or_else(|| AppError::RemoteQuery("no activity configured".to_string()))?;
        serde_json::from_value(value).map_err(|e| AppError::RemoteData(e.to_string()))
    }

    async fn fetch_repo_languages(
        &self,
        _token: &str,
        owner: &str,
        repo: &str,
    ) -> Result<LanguageBytes, AppError> {
        self.language_calls.fetch_add(1, Ordering::Relaxed);
        match self.languages.get(&format!("{owner}/{repo}")) {
            Some(Ok(langs)) => Ok(LanguageBytes(
                langs.iter().map(|(n, b)| (n.to_string(), *b)).collect(),
            )),
            Some(Err(msg)) => Err(AppError::RemoteQuery(msg.clone())),
            None => Ok(LanguageBytes::default()),
        }
    }

    async fn fetch_calendar(
        &self,
        _token: &str,
        _from: &str,
        _to: &str,
    ) -> Result<CalendarDays, AppError> {
        match &self.calendar {
            Some(Ok(value)) => serde_json::from_value(value.clone())
                .map_err(|e| AppError::RemoteData(e.to_string())),
            Some(Err(msg)) => Err(AppError::RemoteQuery(msg.clone())),
            None => Ok(CalendarDays::default()),
        }
    }
}

/// One `…ContributionsByRepository` entry.
pub fn repo_entry(name_with_owner: &str, count: u64) -> serde_json::Value {
    serde_json::json!({
        "repository": {
            "nameWithOwner": name_with_owner,
            "url": format!("https://github.com/{name_with_owner}"),
        },
        "contributions": { "totalCount": count },
    })
}

/// Viewer activity body with the given breakdowns and calendar days.
///
/// `days` are `(date, count, weekday)` and land in a single week.
pub fn activity_json(
    totals: (u64, u64, u64),
    commits: Vec<serde_json::Value>,
    prs: Vec<serde_json::Value>,
    issues: Vec<serde_json::Value>,
    days: &[(&str, u64, u8)],
) -> serde_json::Value {
    let contribution_days: Vec<_> = days
        .iter()
        .map(|(date, count, weekday)| {
            serde_json::json!({ "date": date, "contributionCount": count, "weekday": weekday })
        })
        .collect();
    let total: u64 = days.iter().map(|(_, c, _)| c).sum();

    serde_json::json!({
        "login": "octocat",
        "name": "The Octocat",
        "avatarUrl": "https://avatars.githubusercontent.com/u/583231",
        "contributionsCollection": {
            "contributionCalendar": {
                "totalContributions": total,
                "weeks": [{ "contributionDays": contribution_days }],
            },
            "totalCommitContributions": totals.0,
            "totalPullRequestContributions": totals.1,
            "totalIssueContributions": totals.2,
            "commitContributionsByRepository": commits,
            "pullRequestContributionsByRepository": prs,
            "issueContributionsByRepository": issues,
        }
    })
}
