use super::sheets_client::{ClientFactory, ProviderError, SheetsClient, UpstreamError};
use super::sheets_models::{
    normalize_grid, CellGrid, UpdateSummary, ValueInputOption, ValueRenderOption,
};
use tokio::sync::OnceCell;

/// Text the Sheets API puts in 400 responses for ranges it cannot resolve.
const RANGE_PARSE_MARKER: &str = "Unable to parse range";

/// Classified failure of a single sheets operation.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// The client could not be built. Propagated to the caller as a fault.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Spreadsheet not found with ID: {spreadsheet_id}")]
    NotFound { spreadsheet_id: String },
    #[error("Invalid range '{range}': {source}")]
    InvalidRange {
        range: String,
        source: UpstreamError,
    },
    #[error("Bad request: {0}")]
    BadRequest(UpstreamError),
    #[error("{0}")]
    Upstream(UpstreamError),
    /// Anything that did not come back as a structured API error.
    #[error("{0}")]
    Unexpected(UpstreamError),
}

impl SheetsError {
    /// Sorts an upstream failure by status first. The range-parse text match only
    /// refines a failure that is not already a not-found.
    pub fn classify(err: UpstreamError, spreadsheet_id: &str, range: Option<&str>) -> Self {
        let (status, code) = match &err {
            UpstreamError::Api { status, code, .. } => (*status, code.as_deref()),
            UpstreamError::Transport(_) | UpstreamError::Decode(_) => {
                return SheetsError::Unexpected(err);
            }
        };

        if status == 404 || code == Some("NOT_FOUND") {
            return SheetsError::NotFound {
                spreadsheet_id: spreadsheet_id.to_string(),
            };
        }

        if let Some(range) = range {
            if mentions_range_parse(&err) {
                return SheetsError::InvalidRange {
                    range: range.to_string(),
                    source: err,
                };
            }
        }

        if status == 400 || code == Some("INVALID_ARGUMENT") {
            SheetsError::BadRequest(err)
        } else {
            SheetsError::Upstream(err)
        }
    }

    /// Like `classify`, but a write only reports an invalid range for a client
    /// error. Any other status mentioning the range stays a plain upstream failure.
    pub fn classify_write(err: UpstreamError, spreadsheet_id: &str, range: &str) -> Self {
        match Self::classify(err, spreadsheet_id, Some(range)) {
            SheetsError::InvalidRange { source, .. } if !is_client_error(&source) => {
                SheetsError::Upstream(source)
            }
            other => other,
        }
    }
}

fn is_client_error(err: &UpstreamError) -> bool {
    match err {
        UpstreamError::Api { status, code, .. } => {
            *status == 400 || code.as_deref() == Some("INVALID_ARGUMENT")
        }
        _ => false,
    }
}

fn mentions_range_parse(err: &UpstreamError) -> bool {
    match err {
        UpstreamError::Api { message, body, .. } => {
            message.contains(RANGE_PARSE_MARKER) || body.contains(RANGE_PARSE_MARKER)
        }
        _ => false,
    }
}

/// Owns the lazily-built Sheets client and runs the three tool operations on it.
///
/// The client is built at most once per service; concurrent first callers wait on
/// the same construction. A failed construction is not cached, so the next call
/// tries again. There is no invalidation: a revoked credential shows up only as
/// upstream errors on later calls.
pub struct SheetsService {
    factory: Box<dyn ClientFactory>,
    client: OnceCell<Box<dyn SheetsClient>>,
}

impl SheetsService {
    pub fn new(factory: Box<dyn ClientFactory>) -> Self {
        Self {
            factory,
            client: OnceCell::new(),
        }
    }

    /// Returns the cached client, building it on first demand.
    pub async fn client(&self) -> Result<&dyn SheetsClient, ProviderError> {
        let client = self
            .client
            .get_or_try_init(|| async {
                tracing::info!("Initializing Google Sheets client");
                let client = self.factory.connect().await;
                if let Err(e) = &client {
                    tracing::error!("Failed to initialize Google Sheets client: {}", e);
                }
                client
            })
            .await?;
        Ok(client.as_ref())
    }

    pub async fn list_sheets(&self, spreadsheet_id: &str) -> Result<Vec<String>, SheetsError> {
        let client = self.client().await?;

        let titles = client
            .sheet_titles(spreadsheet_id)
            .await
            .map_err(|e| SheetsError::classify(e, spreadsheet_id, None))?;

        tracing::debug!("Spreadsheet {} has {} tab(s)", spreadsheet_id, titles.len());

        Ok(titles.into_iter().map(Option::unwrap_or_default).collect())
    }

    pub async fn read_cells(
        &self,
        spreadsheet_id: &str,
        range: &str,
        render: ValueRenderOption,
    ) -> Result<CellGrid, SheetsError> {
        let client = self.client().await?;

        let rows = client
            .get_values(spreadsheet_id, range, render)
            .await
            .map_err(|e| SheetsError::classify(e, spreadsheet_id, Some(range)))?;

        Ok(normalize_grid(rows))
    }

    pub async fn write_cells(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &CellGrid,
        input: ValueInputOption,
    ) -> Result<UpdateSummary, SheetsError> {
        let client = self.client().await?;

        let summary = client
            .update_values(spreadsheet_id, range, values, input)
            .await
            .map_err(|e| SheetsError::classify_write(e, spreadsheet_id, range))?;

        tracing::info!(
            "Updated {} cell(s) in {} ({})",
            summary.updated_cells,
            summary.updated_range,
            spreadsheet_id
        );

        Ok(summary)
    }
}
