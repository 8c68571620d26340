use super::sheets_models::{CellGrid, UpdateSummary, ValueInputOption, ValueRenderOption};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

/// Failure reported by a single Sheets API call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// The API answered with a non-success status and (usually) a Google error envelope.
    #[error("HTTP {status}{}: {message}", code_suffix(.code))]
    Api {
        status: u16,
        /// Canonical status name from the error envelope, e.g. `NOT_FOUND`.
        code: Option<String>,
        message: String,
        /// Raw response body, kept for bad-request reporting.
        body: String,
    },
    /// The request never produced an API answer (DNS, TLS, connection reset, timeout, auth).
    #[error("{0}")]
    Transport(String),
    /// The API answered with success but the body was not what we expected.
    #[error("Malformed Sheets API response: {0}")]
    Decode(String),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(" ({c})"))
        .unwrap_or_default()
}

/// Failure to build the authenticated client. These are not recoverable
/// within a call and surface to the caller as faults.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Credential path not configured: environment variable {variable} is not set")]
    NotConfigured { variable: String },
    #[error("Service account key file not found at: {}", .0.display())]
    CredentialNotFound(PathBuf),
    #[error("Invalid service account key file {}: {reason}", .path.display())]
    InvalidCredential { path: PathBuf, reason: String },
    #[error("Error building Sheets service: {0}")]
    Upstream(String),
}

/// The three Sheets API calls the tools need.
#[async_trait]
pub trait SheetsClient: Send + Sync {
    /// Tab titles in spreadsheet order. `None` where a tab carries no title.
    async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<Option<String>>, UpstreamError>;

    /// Raw values for exactly `range`. An empty range yields no rows.
    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        render: ValueRenderOption,
    ) -> Result<Vec<Vec<Value>>, UpstreamError>;

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &CellGrid,
        input: ValueInputOption,
    ) -> Result<UpdateSummary, UpstreamError>;
}

/// Builds the authenticated client on first use.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn SheetsClient>, ProviderError>;
}
