// =============================================================================
// GOOGLE SHEETS REST CLIENT
// =============================================================================
//
// Implements the core `SheetsClient` trait against the Sheets API v4:
//
// - `GET  /v4/spreadsheets/{id}?fields=sheets.properties.title`
// - `GET  /v4/spreadsheets/{id}/values/{range}`
// - `PUT  /v4/spreadsheets/{id}/values/{range}?valueInputOption=...`
//
// Non-success responses are decoded from Google's error envelope
// (`{"error": {"code", "message", "status"}}`) so the core layer can classify
// them by status instead of by message text.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::sheets::{
    CellGrid, SheetsClient, UpdateSummary, UpstreamError, ValueInputOption, ValueRenderOption,
};
use crate::infra::google_auth::AccessTokenSource;

/// Only tab titles; keeps cell data out of the metadata response.
const SHEET_TITLES_FIELDS: &str = "sheets.properties.title";

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: Option<SheetProperties>,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    major_dimension: &'static str,
    values: &'a CellGrid,
}

/// The API leaves out zero counts, hence the defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    #[serde(default)]
    updated_cells: u64,
    #[serde(default)]
    updated_range: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
}

/// Authenticated Sheets API v4 client.
pub struct GoogleSheetsClient {
    client: Client,
    api_base: Url,
    auth: Box<dyn AccessTokenSource>,
}

impl GoogleSheetsClient {
    pub fn new(
        client: Client,
        api_base: &str,
        auth: Box<dyn AccessTokenSource>,
    ) -> Result<Self, String> {
        let api_base = Url::parse(api_base)
            .map_err(|e| format!("Invalid Sheets API base URL {}: {}", api_base, e))?;
        if api_base.cannot_be_a_base() {
            return Err(format!("Sheets API base URL {} cannot carry a path", api_base));
        }

        Ok(Self {
            client,
            api_base,
            auth,
        })
    }

    /// `{base}/v4/spreadsheets/{id}[/values/{range}]` with each piece
    /// percent-encoded as a single path segment.
    fn endpoint(&self, spreadsheet_id: &str, range: Option<&str>) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", spreadsheet_id]);
            if let Some(range) = range {
                segments.extend(["values", range]);
            }
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, UpstreamError> {
        let token = self
            .auth
            .access_token()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

fn api_error(status: StatusCode, body: String) -> UpstreamError {
    let (code, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => (envelope.error.status, envelope.error.message),
        Err(_) if body.trim().is_empty() => (
            None,
            status.canonical_reason().unwrap_or("Unknown error").to_string(),
        ),
        Err(_) => (None, body.trim().to_string()),
    };

    UpstreamError::Api {
        status: status.as_u16(),
        code,
        message,
        body,
    }
}

#[async_trait]
impl SheetsClient for GoogleSheetsClient {
    async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<Option<String>>, UpstreamError> {
        let request = self
            .client
            .get(self.endpoint(spreadsheet_id, None))
            .query(&[("fields", SHEET_TITLES_FIELDS)]);

        let metadata: SpreadsheetMetadata = Self::decode(self.send(request).await?).await?;

        Ok(metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.and_then(|p| p.title))
            .collect())
    }

    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        render: ValueRenderOption,
    ) -> Result<Vec<Vec<Value>>, UpstreamError> {
        tracing::debug!("Reading {} from {}", range, spreadsheet_id);

        let request = self
            .client
            .get(self.endpoint(spreadsheet_id, Some(range)))
            .query(&[("valueRenderOption", render.as_api_str())]);

        let value_range: ValueRange = Self::decode(self.send(request).await?).await?;
        Ok(value_range.values)
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &CellGrid,
        input: ValueInputOption,
    ) -> Result<UpdateSummary, UpstreamError> {
        tracing::debug!(
            "Writing {} row(s) to {} in {} ({})",
            values.len(),
            range,
            spreadsheet_id,
            input.as_api_str()
        );

        let request = self
            .client
            .put(self.endpoint(spreadsheet_id, Some(range)))
            .query(&[("valueInputOption", input.as_api_str())])
            .json(&ValueRangeBody {
                major_dimension: "ROWS",
                values,
            });

        let response: UpdateValuesResponse = Self::decode(self.send(request).await?).await?;
        Ok(UpdateSummary {
            updated_cells: response.updated_cells,
            updated_range: response.updated_range,
        })
    }
}
