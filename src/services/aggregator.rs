// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Yearly activity aggregation.
//!
//! Handles the core workflow:
//! 1. Fetch identity, calendar, per-repository breakdowns and totals
//! 2. Merge the three breakdowns into per-repository totals, keep the top 8
//! 3. Fetch and merge language bytes of those repositories, keep the top 6
//! 4. Derive best month, best weekday and badge from the calendar and totals

use crate::config::{Config, LanguageFailurePolicy, DEFAULT_LANGUAGE_FETCH_CONCURRENCY};
use crate::error::{AppError, Result};
use crate::models::{
    Badge, ContributionSummary, Fun, Profile, TopLanguage, TopRepo, Totals, TOP_LANGUAGES_LIMIT,
    TOP_REPOS_LIMIT,
};
use crate::services::github::{ContributionCalendar, ContributionSource, RepoContribution};
use crate::services::merge::{percentage, OrderedTally};
use crate::time_utils::{month_name, weekday_index, year_range};
use futures_util::{stream, StreamExt};

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const DEFAULT_BEST_MONTH: &str = "January";
const DEFAULT_BEST_WEEKDAY: u8 = 1;

/// Knobs for the language fetch step.
#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    /// Maximum in-flight language requests
    pub language_fetch_concurrency: usize,
    pub language_failure_policy: LanguageFailurePolicy,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            language_fetch_concurrency: DEFAULT_LANGUAGE_FETCH_CONCURRENCY,
            language_failure_policy: LanguageFailurePolicy::Fail,
        }
    }
}

impl AggregateOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            language_fetch_concurrency: config.language_fetch_concurrency,
            language_failure_policy: config.language_failure_policy,
        }
    }
}

/// Build the yearly summary for the owner of `token`.
///
/// `active_days` and `repo_count` are left unset; see `enrich`.
pub async fn aggregate<S: ContributionSource>(
    source: &S,
    token: &str,
    year: i32,
    options: &AggregateOptions,
) -> Result<ContributionSummary> {
    let (from, to) = year_range(year);
    tracing::info!(year, "Fetching yearly activity");

    let report = source.fetch_activity(token, &from, &to).await?;
    let cc = &report.contributions_collection;

    let top_repos = rank_repos([
        cc.commit_contributions_by_repository.as_slice(),
        cc.pull_request_contributions_by_repository.as_slice(),
        cc.issue_contributions_by_repository.as_slice(),
    ]);

    let languages = collect_languages(source, token, &top_repos, options).await?;
    let top_languages = rank_languages(languages);

    let (best_month, best_weekday) = busiest_month_and_weekday(&cc.contribution_calendar)?;

    let commits = cc.total_commit_contributions;
    let prs = cc.total_pull_request_contributions;
    let issues = cc.total_issue_contributions;
    let badge = Badge::from_totals(commits, prs, issues);

    tracing::info!(
        login = %report.login,
        year,
        repos = top_repos.len(),
        languages = top_languages.len(),
        badge = %badge,
        "Aggregated yearly activity"
    );

    Ok(ContributionSummary {
        year,
        profile: Profile {
            login: report.login,
            name: report.name,
            avatar_url: report.avatar_url,
        },
        totals: Totals {
            commits,
            prs,
            issues,
            contributions: Some(
                report
                    .contributions_collection
                    .contribution_calendar
                    .total_contributions,
            ),
            active_days: None,
            repo_count: None,
        },
        top_repos,
        top_languages,
        fun: Fun {
            best_month,
            best_weekday,
            badge,
        },
        generated_at: chrono::Utc::now(),
    })
}

/// Sum contributions per repository across all breakdowns and keep the top 8.
///
/// Ties keep the order in which repositories were first seen.
pub fn rank_repos<'a>(
    breakdowns: impl IntoIterator<Item = &'a [RepoContribution]>,
) -> Vec<TopRepo> {
    let mut repos: OrderedTally<String, TopRepo> = OrderedTally::new();

    for entry in breakdowns.into_iter().flatten() {
        repos.merge(
            entry.repository.name_with_owner.clone(),
            TopRepo {
                name_with_owner: entry.repository.name_with_owner.clone(),
                url: entry.repository.url.clone(),
                contributions: entry.contributions.total_count,
            },
            |repo, more| repo.contributions += more.contributions,
        );
    }

    repos
        .into_sorted_desc(|repo| repo.contributions)
        .into_iter()
        .take(TOP_REPOS_LIMIT)
        .map(|(_, repo)| repo)
        .collect()
}

/// Fetch languages for each repository and sum bytes per language.
///
/// Requests run concurrently but results are merged in `repos` order, so
/// the outcome matches a sequential fetch.
async fn collect_languages<S: ContributionSource>(
    source: &S,
    token: &str,
    repos: &[TopRepo],
    options: &AggregateOptions,
) -> Result<OrderedTally<String, u64>> {
    // Owned names keep the stream free of borrows into `repos`.
    let names: Vec<String> = repos.iter().map(|r| r.name_with_owner.clone()).collect();
    let mut results = stream::iter(names)
        .map(|repo| async move {
            let parts = split_name_with_owner(&repo)
                .map(|(owner, name)| (owner.to_string(), name.to_string()));
            let result = match parts {
                Some((owner, name)) => source.fetch_repo_languages(token, &owner, &name).await,
                None => Err(AppError::RemoteData(format!(
                    "Malformed repository name: {}",
                    repo
                ))),
            };
            (repo, result)
        })
        .buffered(options.language_fetch_concurrency.max(1));

    let mut languages = OrderedTally::new();
    while let Some((repo, result)) = results.next().await {
        match result {
            Ok(bytes) => {
                for (name, count) in bytes.0 {
                    languages.add(name, count);
                }
            }
            Err(e) if options.language_failure_policy == LanguageFailurePolicy::Skip => {
                tracing::warn!(
                    repo = %repo,
                    error = %e,
                    "Skipping repository languages"
                );
            }
            Err(e) => {
                tracing::error!(
                    repo = %repo,
                    error = %e,
                    "Language fetch failed"
                );
                return Err(e);
            }
        }
    }

    tracing::debug!(count = languages.len(), "Merged repository languages");
    Ok(languages)
}

/// Turn merged language bytes into the top 6 with percentages.
///
/// Percentages are relative to all languages, not only the kept ones.
pub fn rank_languages(languages: OrderedTally<String, u64>) -> Vec<TopLanguage> {
    let total_bytes = languages.total();

    languages
        .into_sorted_desc(|bytes| *bytes)
        .into_iter()
        .take(TOP_LANGUAGES_LIMIT)
        .map(|(name, bytes)| TopLanguage {
            name,
            bytes,
            pct: percentage(bytes, total_bytes),
        })
        .collect()
}

/// Month name and weekday abbreviation with the most contributions.
///
/// Ties go to whichever was seen first in calendar order. An empty
/// calendar yields ("January", "Mon").
pub fn busiest_month_and_weekday(calendar: &ContributionCalendar) -> Result<(String, String)> {
    let mut months: OrderedTally<&'static str, u64> = OrderedTally::new();
    let mut weekdays: OrderedTally<u8, u64> = OrderedTally::new();

    for day in calendar.days() {
        let month = month_name(&day.date)
            .ok_or_else(|| AppError::RemoteData(format!("Invalid calendar date: {}", day.date)))?;

        let weekday = match day.weekday {
            Some(w) if (w as usize) < WEEKDAY_NAMES.len() => w,
            Some(w) => {
                return Err(AppError::RemoteData(format!(
                    "Invalid weekday {} for {}",
                    w, day.date
                )))
            }
            None => weekday_index(&day.date).ok_or_else(|| {
                AppError::RemoteData(format!("Invalid calendar date: {}", day.date))
            })?,
        };

        months.add(month, day.contribution_count);
        weekdays.add(weekday, day.contribution_count);
    }

    let best_month = months.max_key().copied().unwrap_or(DEFAULT_BEST_MONTH);
    let best_weekday = weekdays.max_key().copied().unwrap_or(DEFAULT_BEST_WEEKDAY);

    Ok((
        best_month.to_string(),
        WEEKDAY_NAMES[best_weekday as usize].to_string(),
    ))
}

/// Split "owner/repo" into its two parts.
fn split_name_with_owner(name_with_owner: &str) -> Option<(&str, &str)> {
    let (owner, repo) = name_with_owner.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner, repo))
}
