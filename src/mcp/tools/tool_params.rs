use rmcp::schemars;
use serde::Deserialize;

use crate::core::sheets::{ValueInputOption, ValueRenderOption};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSheetsRequest {
    #[schemars(description = "The ID of the Google Spreadsheet.")]
    pub spreadsheet_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadCellsRequest {
    #[schemars(description = "The ID of the Google Spreadsheet.")]
    pub spreadsheet_id: String,

    #[schemars(description = "The A1 notation of the range to read (e.g., 'Sheet1!A1:C5').")]
    pub range_name: String,

    /// How values are rendered before being turned into text. Default: FORMATTED_VALUE.
    #[serde(default)]
    #[schemars(
        description = "How cell values are rendered: FORMATTED_VALUE (default, as displayed), UNFORMATTED_VALUE (raw numbers/booleans) or FORMULA."
    )]
    pub value_render_option: Option<RenderOption>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WriteCellsRequest {
    #[schemars(description = "The ID of the Google Spreadsheet.")]
    pub spreadsheet_id: String,

    #[schemars(
        description = "The A1 notation of the starting cell for the write (e.g., 'Sheet1!A1')."
    )]
    pub range_name: String,

    #[schemars(description = "A 2D list of strings containing the data to write, row by row.")]
    pub values: Vec<Vec<String>>,

    /// Default: USER_ENTERED.
    #[serde(default)]
    #[schemars(
        description = "USER_ENTERED (default) parses values as if typed into the UI, so '=1+1' becomes a formula and '2024-01-31' a date. RAW stores every value as literal text."
    )]
    pub value_input_option: Option<InputOption>,
}

#[derive(Debug, Clone, Copy, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderOption {
    FormattedValue,
    UnformattedValue,
    Formula,
}

impl From<RenderOption> for ValueRenderOption {
    fn from(option: RenderOption) -> Self {
        match option {
            RenderOption::FormattedValue => ValueRenderOption::FormattedValue,
            RenderOption::UnformattedValue => ValueRenderOption::UnformattedValue,
            RenderOption::Formula => ValueRenderOption::Formula,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputOption {
    UserEntered,
    Raw,
}

impl From<InputOption> for ValueInputOption {
    fn from(option: InputOption) -> Self {
        match option {
            InputOption::UserEntered => ValueInputOption::UserEntered,
            InputOption::Raw => ValueInputOption::Raw,
        }
    }
}
