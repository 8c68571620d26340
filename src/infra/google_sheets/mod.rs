// =============================================================================
// GOOGLE SHEETS MODULE
// =============================================================================
//
// Infra side of the sheets feature: the REST client implementing the core
// `SheetsClient` trait and the provider that builds it from configuration.
//
// **Usage:**
// ```ignore
// let provider = GoogleSheetsProvider::new(ServerConfig::from_env());
// let service = SheetsService::new(Box::new(provider));
// let tabs = service.list_sheets(spreadsheet_id).await?;
// ```

pub mod google_sheets_client;
pub mod sheets_provider;

pub use sheets_provider::GoogleSheetsProvider;
