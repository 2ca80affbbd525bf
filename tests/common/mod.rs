// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use gh_wrapped::config::{Config, LanguageFailurePolicy};
use gh_wrapped::db::WrappedDb;
use gh_wrapped::routes::create_router;
use gh_wrapped::services::GitHubClient;
use gh_wrapped::AppState;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub const ALICE_TOKEN: &str = "gho_alice";
pub const ALICE_ID: u64 = 1001;
pub const BOB_TOKEN: &str = "gho_bob";
pub const BOB_ID: u64 = 2002;

/// Check if emulator is available via environment variable.
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
pub async fn test_db() -> WrappedDb {
    WrappedDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Switches and counters for the fake GitHub API.
#[derive(Default)]
pub struct FakeGitHub {
    pub fail_activity: AtomicBool,
    pub fail_calendar: AtomicBool,
    pub fail_languages: AtomicBool,
    pub rate_limit_user: AtomicBool,
    pub graphql_calls: AtomicUsize,
    pub language_calls: AtomicUsize,
}

impl FakeGitHub {
    pub fn set(flag: &AtomicBool, value: bool) {
        flag.store(value, Ordering::SeqCst);
    }
}

fn user_for(headers: &HeaderMap) -> Option<(u64, &'static str)> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    match auth.strip_prefix("Bearer ")? {
        ALICE_TOKEN => Some((ALICE_ID, "alice")),
        BOB_TOKEN => Some((BOB_ID, "bob")),
        _ => None,
    }
}

fn bad_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Bad credentials" })),
    )
        .into_response()
}

async fn fake_user(State(fake): State<Arc<FakeGitHub>>, headers: HeaderMap) -> Response {
    if fake.rate_limit_user.load(Ordering::SeqCst) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "message": "API rate limit exceeded" })),
        )
            .into_response();
    }
    match user_for(&headers) {
        Some((id, login)) => Json(json!({
            "id": id,
            "login": login,
            "name": null,
            "avatar_url": format!("https://avatars.example.com/{login}"),
        }))
        .into_response(),
        None => bad_credentials(),
    }
}

async fn fake_graphql(
    State(fake): State<Arc<FakeGitHub>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    fake.graphql_calls.fetch_add(1, Ordering::SeqCst);
    let Some((_, login)) = user_for(&headers) else {
        return bad_credentials();
    };
    let query = body["query"].as_str().unwrap_or_default();

    if query.contains("query Calendar") {
        if fake.fail_calendar.load(Ordering::SeqCst) {
            return (StatusCode::BAD_GATEWAY, "upstream hiccup").into_response();
        }
        return Json(json!({ "data": { "viewer": { "contributionsCollection": {
            "contributionCalendar": { "weeks": [{ "contributionDays": calendar_days(false) }] }
        }}}}))
        .into_response();
    }

    if fake.fail_activity.load(Ordering::SeqCst) {
        return Json(json!({ "data": null, "errors": [{ "message": "Something went wrong" }] }))
            .into_response();
    }

    Json(json!({ "data": { "viewer": activity(login) } })).into_response()
}

async fn fake_languages(
    State(fake): State<Arc<FakeGitHub>>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    fake.language_calls.fetch_add(1, Ordering::SeqCst);
    if fake.fail_languages.load(Ordering::SeqCst) && repo == "docs" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response();
    }
    let body = match (owner.as_str(), repo.as_str()) {
        ("octo", "api") => json!({ "Rust": 6000, "Shell": 1000 }),
        ("octo", "web") => json!({ "TypeScript": 2500, "Rust": 500 }),
        ("octo", "docs") => json!({ "Markdown": 0 }),
        _ => json!({}),
    };
    Json(body).into_response()
}

fn repo(name: &str, count: u64) -> Value {
    json!({
        "repository": { "nameWithOwner": name, "url": format!("https://github.com/{name}") },
        "contributions": { "totalCount": count },
    })
}

/// 2024-03-05 is a Tuesday.
fn calendar_days(with_weekday: bool) -> Vec<Value> {
    [
        ("2024-01-02", 1, 2),
        ("2024-03-05", 9, 2),
        ("2024-03-06", 0, 3),
        ("2024-07-12", 4, 5),
    ]
    .iter()
    .map(|(date, count, weekday)| {
        if with_weekday {
            json!({ "date": date, "contributionCount": count, "weekday": weekday })
        } else {
            json!({ "date": date, "contributionCount": count })
        }
    })
    .collect()
}

fn activity(login: &str) -> Value {
    json!({
        "login": login,
        "name": null,
        "avatarUrl": format!("https://avatars.example.com/{login}"),
        "contributionsCollection": {
            "contributionCalendar": {
                "totalContributions": 14,
                "weeks": [{ "contributionDays": calendar_days(true) }],
            },
            "totalCommitContributions": 10,
            "totalPullRequestContributions": 3,
            "totalIssueContributions": 1,
            "commitContributionsByRepository": [repo("octo/api", 7), repo("octo/web", 3)],
            "pullRequestContributionsByRepository": [repo("octo/web", 2), repo("octo/docs", 1)],
            "issueContributionsByRepository": [repo("octo/docs", 1)],
        }
    })
}

/// Serve the fake GitHub API on an ephemeral local port.
/// Returns its base URL.
pub async fn spawn_fake_github(fake: Arc<FakeGitHub>) -> String {
    let app = Router::new()
        .route("/user", get(fake_user))
        .route("/graphql", post(fake_graphql))
        .route("/repos/{owner}/{repo}/languages", get(fake_languages))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake GitHub");
    let addr = listener.local_addr().expect("fake GitHub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{}", addr)
}

/// Create a test app backed by the in-memory store and a fake GitHub.
/// Returns the router, the shared state and the fake's switches.
pub async fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<FakeGitHub>) {
    create_test_app_with_policy(LanguageFailurePolicy::Fail).await
}

pub async fn create_test_app_with_policy(
    policy: LanguageFailurePolicy,
) -> (axum::Router, Arc<AppState>, Arc<FakeGitHub>) {
    let fake = Arc::new(FakeGitHub::default());
    let api_url = spawn_fake_github(fake.clone()).await;

    let mut config = Config::test_default();
    config.github_api_url = api_url.clone();
    config.language_failure_policy = policy;

    let state = Arc::new(AppState {
        config,
        db: WrappedDb::new_memory(),
        github: GitHubClient::new(api_url).expect("GitHub client"),
    });

    (create_router(state.clone()), state, fake)
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("JSON body")
}
