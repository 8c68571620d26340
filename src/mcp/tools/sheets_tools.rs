use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Serialize;

use super::params::{ListSheetsRequest, ReadCellsRequest, WriteCellsRequest};
use super::replies::{list_sheets_reply, read_cells_reply, write_cells_reply};
use crate::core::sheets::{ProviderError, SheetsService, ValueInputOption, ValueRenderOption};

const INSTRUCTIONS: &str = "Google Sheets access for a single service account. \
Use 'list_sheets' to discover the tabs of a spreadsheet, 'read_cells' to fetch a range \
in A1 notation as rows of strings, and 'write_cells' to overwrite a range starting at a cell. \
Failures that concern the spreadsheet or range come back as text beginning with 'Error'.";

/// MCP front end for the sheets service.
#[derive(Clone)]
pub struct SheetsToolServer {
    service: Arc<SheetsService>,
    tool_router: ToolRouter<Self>,
}

impl SheetsToolServer {
    pub fn new(service: Arc<SheetsService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }
}

fn provider_fault(e: ProviderError) -> McpError {
    tracing::error!("Sheets client unavailable: {}", e);
    McpError::internal_error(e.to_string(), None)
}

fn json_reply<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text =
        serde_json::to_string(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn warn_if_error(tool: &str, first: Option<&String>) {
    if let Some(message) = first.filter(|m| m.starts_with("Error") || m.starts_with("Unexpected")) {
        tracing::warn!("{} failed: {}", tool, message);
    }
}

#[tool_router]
impl SheetsToolServer {
    #[tool(
        description = "Lists the names of all sheets (tabs) within a specified Google Spreadsheet. Returns a JSON array of titles in tab order."
    )]
    pub async fn list_sheets(
        &self,
        Parameters(request): Parameters<ListSheetsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("list_sheets({})", request.spreadsheet_id);

        let result = self.service.list_sheets(&request.spreadsheet_id).await;
        let titles =
            list_sheets_reply(&request.spreadsheet_id, result).map_err(provider_fault)?;

        if titles.len() == 1 {
            warn_if_error("list_sheets", titles.first());
        }
        json_reply(&titles)
    }

    #[tool(
        description = "Reads data from a range in a Google Sheet. Returns a JSON array of rows, each an array of cell values as strings. Cells that are empty at the end of a row are omitted."
    )]
    pub async fn read_cells(
        &self,
        Parameters(request): Parameters<ReadCellsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            "read_cells({}, {})",
            request.spreadsheet_id,
            request.range_name
        );

        let render = request
            .value_render_option
            .map(ValueRenderOption::from)
            .unwrap_or_default();
        let result = self
            .service
            .read_cells(&request.spreadsheet_id, &request.range_name, render)
            .await;
        let grid = read_cells_reply(&request.spreadsheet_id, &request.range_name, result)
            .map_err(provider_fault)?;

        if grid.len() == 1 {
            warn_if_error("read_cells", grid[0].first());
        }
        json_reply(&grid)
    }

    #[tool(
        description = "Writes data to a range in a Google Sheet, starting at the given cell. Values are interpreted as if typed into the UI unless value_input_option is RAW. Returns a status message."
    )]
    pub async fn write_cells(
        &self,
        Parameters(request): Parameters<WriteCellsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            "write_cells({}, {}, {} row(s))",
            request.spreadsheet_id,
            request.range_name,
            request.values.len()
        );

        let input = request
            .value_input_option
            .map(ValueInputOption::from)
            .unwrap_or_default();
        let result = self
            .service
            .write_cells(
                &request.spreadsheet_id,
                &request.range_name,
                &request.values,
                input,
            )
            .await;
        let message = write_cells_reply(&request.spreadsheet_id, &request.range_name, result)
            .map_err(provider_fault)?;

        warn_if_error("write_cells", Some(&message));
        Ok(CallToolResult::success(vec![Content::text(message)]))
    }
}

#[tool_handler]
impl ServerHandler for SheetsToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
