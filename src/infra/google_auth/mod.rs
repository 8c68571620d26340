// Google OAuth2 for service accounts. Lives in infra because it does network
// I/O against Google's token endpoint; the core layer never sees tokens.

pub mod service_account;

pub use service_account::{AccessTokenSource, ServiceAccountAuth, SPREADSHEETS_SCOPE};
