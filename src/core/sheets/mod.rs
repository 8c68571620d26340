pub mod sheets_client;
pub mod sheets_models;
pub mod sheets_service;

pub use sheets_client::{ClientFactory, ProviderError, SheetsClient, UpstreamError};
pub use sheets_models::{CellGrid, UpdateSummary, ValueInputOption, ValueRenderOption};
pub use sheets_service::{SheetsError, SheetsService};
