// Server configuration, read once from the environment at startup.
//
// Nothing below `main` reads environment variables: the resolved values are
// handed to the infra layer explicitly.

use std::path::PathBuf;
use std::time::Duration;

/// Path to the service account JSON key. Required before the first tool call.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Overrides the Sheets API origin (proxies, local stubs).
pub const API_BASE_ENV: &str = "GOOGLE_SHEETS_API_BASE";
/// Per-request timeout in seconds. Unset means requests may wait indefinitely.
pub const TIMEOUT_ENV: &str = "GOOGLE_SHEETS_TIMEOUT_SECS";

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Not validated here; a missing or dangling path is reported on first use.
    pub credentials_path: Option<PathBuf>,
    pub api_base: String,
    pub request_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            credentials_path: None,
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let request_timeout = non_empty(TIMEOUT_ENV).and_then(|raw| match raw.parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                tracing::warn!("Ignoring {}={:?}: not a whole number of seconds", TIMEOUT_ENV, raw);
                None
            }
        });

        Self {
            // Blank means unset, but a real path is kept byte for byte.
            credentials_path: lookup(CREDENTIALS_ENV)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            api_base: non_empty(API_BASE_ENV)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            request_timeout,
        }
    }
}
