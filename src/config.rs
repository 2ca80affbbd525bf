//! Application configuration loaded from environment variables.
//!
//! Secrets are injected as environment variables at deploy time and read
//! once at startup.

use std::env;

/// Default number of concurrent per-repository language fetches.
pub const DEFAULT_LANGUAGE_FETCH_CONCURRENCY: usize = 4;

/// Where generated summaries are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    /// Process-local store, lost on restart.
    Memory,
}

/// What to do when one repository's language breakdown cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageFailurePolicy {
    /// Abort the whole generation.
    #[default]
    Fail,
    /// Log and leave that repository out of the language totals.
    Skip,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GitHub API root (REST paths and `/graphql` live under it)
    pub github_api_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    pub store_backend: StoreBackend,
    pub language_fetch_concurrency: usize,
    pub language_failure_policy: LanguageFailurePolicy,

    // --- Secrets ---
    /// HMAC key used to derive wrapped ids (raw bytes)
    pub wrapped_id_key: Vec<u8>,
}

impl Config {
    /// Config for tests: in-memory store, local GitHub URL.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            github_api_url: "http://127.0.0.1:9".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            store_backend: StoreBackend::Memory,
            language_fetch_concurrency: DEFAULT_LANGUAGE_FETCH_CONCURRENCY,
            language_failure_policy: LanguageFailurePolicy::Fail,
            wrapped_id_key: b"test_wrapped_id_key_32_bytes!!!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend = match env::var("WRAPPED_STORE").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            Ok("firestore") | Err(_) => StoreBackend::Firestore,
            Ok(_) => return Err(ConfigError::Invalid("WRAPPED_STORE")),
        };

        let language_failure_policy = match env::var("LANGUAGE_FAILURE_POLICY").as_deref() {
            Ok("skip") => LanguageFailurePolicy::Skip,
            Ok("fail") | Err(_) => LanguageFailurePolicy::Fail,
            Ok(_) => return Err(ConfigError::Invalid("LANGUAGE_FAILURE_POLICY")),
        };

        let language_fetch_concurrency = match env::var("LANGUAGE_FETCH_CONCURRENCY") {
            Ok(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("LANGUAGE_FETCH_CONCURRENCY"))?,
            Err(_) => DEFAULT_LANGUAGE_FETCH_CONCURRENCY,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            github_api_url: env::var("GITHUB_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            store_backend,
            language_fetch_concurrency,
            language_failure_policy,

            wrapped_id_key: env::var("WRAPPED_ID_KEY")
                .map(|v| v.trim().as_bytes().to_vec())
                .map_err(|_| ConfigError::Missing("WRAPPED_ID_KEY"))?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases live in one test: env vars are process-global.
    #[test]
    fn test_config_from_env() {
        env::set_var("WRAPPED_ID_KEY", " key_from_env ");
        env::set_var("WRAPPED_STORE", "memory");
        env::set_var("LANGUAGE_FAILURE_POLICY", "skip");
        env::set_var("LANGUAGE_FETCH_CONCURRENCY", "2");
        env::set_var("GITHUB_API_URL", "https://ghe.example.com/api/v3/");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.wrapped_id_key, b"key_from_env".to_vec());
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.language_failure_policy, LanguageFailurePolicy::Skip);
        assert_eq!(config.language_fetch_concurrency, 2);
        assert_eq!(config.github_api_url, "https://ghe.example.com/api/v3");

        env::set_var("LANGUAGE_FETCH_CONCURRENCY", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("LANGUAGE_FETCH_CONCURRENCY"))
        ));

        env::remove_var("LANGUAGE_FETCH_CONCURRENCY");
        env::remove_var("LANGUAGE_FAILURE_POLICY");
        env::remove_var("WRAPPED_STORE");
        env::remove_var("GITHUB_API_URL");
    }
}
