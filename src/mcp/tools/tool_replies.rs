// Flattens operation results into the shapes the tools return to the model.
//
// Recoverable failures become ordinary tool output that starts with "Error" or
// "Unexpected error". Only a provider failure (the client could not be built)
// stays an error and is surfaced as a protocol fault by the server.

use crate::core::sheets::{CellGrid, ProviderError, SheetsError, UpdateSummary, UpstreamError};

pub fn list_sheets_reply(
    spreadsheet_id: &str,
    result: Result<Vec<String>, SheetsError>,
) -> Result<Vec<String>, ProviderError> {
    let message = match result {
        Ok(titles) => return Ok(titles),
        Err(SheetsError::Provider(e)) => return Err(e),
        Err(SheetsError::NotFound { .. }) => not_found(spreadsheet_id),
        Err(SheetsError::Unexpected(e)) => format!("Unexpected error listing sheets: {e}"),
        Err(SheetsError::InvalidRange { source: e, .. })
        | Err(SheetsError::BadRequest(e))
        | Err(SheetsError::Upstream(e)) => format!("Error listing sheets: {e}"),
    };
    Ok(vec![message])
}

pub fn read_cells_reply(
    spreadsheet_id: &str,
    range: &str,
    result: Result<CellGrid, SheetsError>,
) -> Result<CellGrid, ProviderError> {
    let row = match result {
        Ok(grid) => return Ok(grid),
        Err(SheetsError::Provider(e)) => return Err(e),
        Err(SheetsError::NotFound { .. }) => vec![not_found(spreadsheet_id)],
        Err(SheetsError::InvalidRange { .. }) => vec![
            format!("Error: Invalid range '{range}'."),
            "Ensure it includes sheet name (e.g., 'Sheet1!A1:B2')".to_string(),
            "or is valid for the first sheet.".to_string(),
        ],
        Err(SheetsError::Unexpected(e)) => vec![format!("Unexpected error reading cells: {e}")],
        Err(SheetsError::BadRequest(e)) | Err(SheetsError::Upstream(e)) => {
            vec![format!("Error reading cells: {e}")]
        }
    };
    Ok(vec![row])
}

pub fn write_cells_reply(
    spreadsheet_id: &str,
    range: &str,
    result: Result<UpdateSummary, SheetsError>,
) -> Result<String, ProviderError> {
    let message = match result {
        Ok(summary) => format!(
            "Successfully updated {} cells in range {}.",
            summary.updated_cells, summary.updated_range
        ),
        Err(SheetsError::Provider(e)) => return Err(e),
        Err(SheetsError::NotFound { .. }) => not_found(spreadsheet_id),
        Err(SheetsError::InvalidRange { .. }) => format!(
            "Error: Invalid range '{range}'. Ensure it includes sheet name (e.g., 'Sheet1!A1') or is valid for the first sheet."
        ),
        Err(SheetsError::BadRequest(e)) => {
            format!("Error writing cells (Bad Request): {}", raw_body(&e))
        }
        Err(SheetsError::Upstream(e)) => format!("Error writing cells: {e}"),
        Err(SheetsError::Unexpected(e)) => format!("Unexpected error writing cells: {e}"),
    };
    Ok(message)
}

fn not_found(spreadsheet_id: &str) -> String {
    format!("Error: Spreadsheet not found with ID: {spreadsheet_id}")
}

fn raw_body(err: &UpstreamError) -> String {
    match err {
        UpstreamError::Api { body, .. } => body.clone(),
        other => other.to_string(),
    }
}
