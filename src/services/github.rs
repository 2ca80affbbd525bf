// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub API client for contribution data.
//!
//! Handles:
//! - The yearly activity GraphQL query (identity, calendar, per-repo breakdowns)
//! - Calendar-only GraphQL query
//! - Per-repository language byte counts (REST)
//! - Viewer identity lookup (REST)
//! - Rate limit and bad-credential detection

use crate::error::AppError;
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::future::Future;

const GITHUB_API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!("gh-wrapped/", env!("CARGO_PKG_VERSION"));

const ACTIVITY_QUERY: &str = r#"
query Wrapped($from: DateTime!, $to: DateTime!) {
  viewer {
    login
    name
    avatarUrl
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            weekday
          }
        }
      }
      totalCommitContributions
      totalPullRequestContributions
      totalIssueContributions
      commitContributionsByRepository(maxRepositories: 20) {
        repository { nameWithOwner url }
        contributions { totalCount }
      }
      pullRequestContributionsByRepository(maxRepositories: 20) {
        repository { nameWithOwner url }
        contributions { totalCount }
      }
      issueContributionsByRepository(maxRepositories: 20) {
        repository { nameWithOwner url }
        contributions { totalCount }
      }
    }
  }
}
"#;

const CALENDAR_QUERY: &str = r#"
query Calendar($from: DateTime!, $to: DateTime!) {
  viewer {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// The remote calls the aggregator and enrichment step depend on.
///
/// `GitHubClient` is the production implementation.
pub trait ContributionSource {
    /// Identity, calendar, per-repository breakdowns and totals for a range.
    fn fetch_activity(
        &self,
        token: &str,
        from: &str,
        to: &str,
    ) -> impl Future<Output = Result<ActivityReport, AppError>> + Send;

    /// Language name to byte count for one repository, in GitHub's order.
    fn fetch_repo_languages(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = Result<LanguageBytes, AppError>> + Send;

    /// Day-by-day calendar only.
    fn fetch_calendar(
        &self,
        token: &str,
        from: &str,
        to: &str,
    ) -> impl Future<Output = Result<CalendarDays, AppError>> + Send;
}

/// GitHub API client.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client rooted at `api_url` (e.g. `https://api.github.com`).
    pub fn new(api_url: impl Into<String>) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the user the token belongs to.
    pub async fn get_viewer(&self, token: &str) -> Result<Viewer, AppError> {
        self.get_rest("/user", token).await
    }

    /// Generic REST GET with JSON response.
    async fn get_rest<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, AppError> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await
            .map_err(|e| AppError::RemoteQuery(e.to_string()))?;

        let response = check_response(response).await?;

        response
            .json()
            .await
            .map_err(|e| AppError::RemoteData(format!("{}: {}", path, e)))
    }

    /// Run a GraphQL query and decode its `data` member.
    async fn graphql<T: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, AppError> {
        let url = format!("{}/graphql", self.api_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| AppError::RemoteQuery(e.to_string()))?;

        let response = check_response(response).await?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::RemoteQuery(format!("GraphQL response is not JSON: {}", e)))?;

        decode_graphql(body)
    }
}

impl ContributionSource for GitHubClient {
    async fn fetch_activity(
        &self,
        token: &str,
        from: &str,
        to: &str,
    ) -> Result<ActivityReport, AppError> {
        let data: ViewerData<ActivityReport> = self
            .graphql(
                token,
                ACTIVITY_QUERY,
                serde_json::json!({ "from": from, "to": to }),
            )
            .await?;
        Ok(data.viewer)
    }

    async fn fetch_repo_languages(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> Result<LanguageBytes, AppError> {
        let path = format!(
            "/repos/{}/{}/languages",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        self.get_rest(&path, token).await
    }

    async fn fetch_calendar(
        &self,
        token: &str,
        from: &str,
        to: &str,
    ) -> Result<CalendarDays, AppError> {
        let data: ViewerData<CalendarOnly> = self
            .graphql(
                token,
                CALENDAR_QUERY,
                serde_json::json!({ "from": from, "to": to }),
            )
            .await?;
        Ok(data.viewer.contributions_collection.contribution_calendar)
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                == Some("0"));

    let body = response.text().await.unwrap_or_default();

    if rate_limited {
        tracing::warn!(status = %status, "GitHub rate limit hit");
        return Err(AppError::RemoteQuery(AppError::RATE_LIMITED.to_string()));
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(AppError::RemoteQuery(AppError::BAD_CREDENTIALS.to_string()));
    }

    Err(AppError::RemoteQuery(format!("HTTP {}: {}", status, body)))
}

/// Split a GraphQL body into errors (query failure) or typed data.
fn decode_graphql<T: for<'de> Deserialize<'de>>(mut body: serde_json::Value) -> Result<T, AppError> {
    if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
                .collect();
            return Err(AppError::RemoteQuery(format!(
                "GraphQL errors: {}",
                if messages.is_empty() {
                    serde_json::Value::Array(errors.clone()).to_string()
                } else {
                    messages.join("; ")
                }
            )));
        }
    }

    let data = match body.get_mut("data").map(serde_json::Value::take) {
        Some(data) if !data.is_null() => data,
        _ => return Err(AppError::RemoteData("GraphQL response has no data".to_string())),
    };

    serde_json::from_value(data).map_err(|e| AppError::RemoteData(e.to_string()))
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ViewerData<T> {
    viewer: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarOnly {
    contributions_collection: CalendarCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarCollection {
    contribution_calendar: CalendarDays,
}

/// Viewer identity from `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct Viewer {
    pub id: u64,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// The viewer part of the yearly activity query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub contributions_collection: ContributionsCollection,
}

/// `contributionsCollection` for one date range.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
    pub total_commit_contributions: u64,
    pub total_pull_request_contributions: u64,
    pub total_issue_contributions: u64,
    pub commit_contributions_by_repository: Vec<RepoContribution>,
    pub pull_request_contributions_by_repository: Vec<RepoContribution>,
    pub issue_contributions_by_repository: Vec<RepoContribution>,
}

/// Day-by-day contributions grouped in weeks, as returned by the activity
/// query. Every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    pub weeks: Vec<CalendarWeek>,
}

impl ContributionCalendar {
    /// All days in calendar order.
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flat_map(|w| w.contribution_days.iter())
    }
}

/// Calendar from the calendar-only query. Missing weeks read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDays {
    #[serde(default)]
    pub weeks: Vec<CalendarWeek>,
}

impl CalendarDays {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flat_map(|w| w.contribution_days.iter())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// `YYYY-MM-DD`
    pub date: String,
    pub contribution_count: u64,
    /// 0 = Sunday .. 6 = Saturday; not requested by the calendar-only query
    #[serde(default)]
    pub weekday: Option<u8>,
}

/// One entry of a `…ContributionsByRepository` list.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoContribution {
    pub repository: RepoRef,
    pub contributions: ContributionCount,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoRef {
    pub name_with_owner: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCount {
    pub total_count: u64,
}

/// `GET /repos/{owner}/{repo}/languages` body, keeping GitHub's key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<String, u64>")]
pub struct LanguageBytes(pub Vec<(String, u64)>);

impl From<IndexMap<String, u64>> for LanguageBytes {
    fn from(map: IndexMap<String, u64>) -> Self {
        Self(map.into_iter().collect())
    }
}
