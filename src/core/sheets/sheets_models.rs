use serde_json::Value;

/// Rows of cells. Rows may be ragged and may be empty.
pub type CellGrid = Vec<Vec<String>>;

/// How the Sheets API interprets values written by `write_cells`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueInputOption {
    /// Parsed as if typed into the UI: formulas, dates and numbers are detected.
    #[default]
    UserEntered,
    /// Stored literally as strings.
    Raw,
}

impl ValueInputOption {
    pub fn as_api_str(self) -> &'static str {
        match self {
            ValueInputOption::UserEntered => "USER_ENTERED",
            ValueInputOption::Raw => "RAW",
        }
    }
}

/// How the Sheets API renders values returned by `read_cells`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueRenderOption {
    #[default]
    FormattedValue,
    UnformattedValue,
    Formula,
}

impl ValueRenderOption {
    pub fn as_api_str(self) -> &'static str {
        match self {
            ValueRenderOption::FormattedValue => "FORMATTED_VALUE",
            ValueRenderOption::UnformattedValue => "UNFORMATTED_VALUE",
            ValueRenderOption::Formula => "FORMULA",
        }
    }
}

/// What the API reports back after a values update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub updated_cells: u64,
    /// The range actually written; may be wider than the one requested.
    pub updated_range: String,
}

/// Lossy string view of a cell value. Numbers and booleans lose their type,
/// so `5` and `"5"` are indistinguishable afterwards.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Applies [`cell_to_string`] to every cell, preserving row shape.
pub fn normalize_grid(rows: Vec<Vec<Value>>) -> CellGrid {
    rows.into_iter()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect()
}
