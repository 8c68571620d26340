use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;

use super::google_sheets_client::GoogleSheetsClient;
use crate::config::{ServerConfig, CREDENTIALS_ENV};
use crate::core::sheets::{ClientFactory, ProviderError, SheetsClient};
use crate::infra::google_auth::{AccessTokenSource, ServiceAccountAuth, SPREADSHEETS_SCOPE};

/// Builds the authenticated Sheets client from the server configuration.
///
/// Checks run in order: credential path configured, file present, key
/// parseable, token exchange accepted. Each maps to its own `ProviderError`.
pub struct GoogleSheetsProvider {
    config: ServerConfig,
}

impl GoogleSheetsProvider {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    fn http_client(&self) -> Result<Client, ProviderError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = self.config.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| ProviderError::Upstream(e.to_string()))
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

#[async_trait]
impl ClientFactory for GoogleSheetsProvider {
    async fn connect(&self) -> Result<Box<dyn SheetsClient>, ProviderError> {
        let path = self
            .config
            .credentials_path
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured {
                variable: CREDENTIALS_ENV.to_string(),
            })?;

        if !is_file(path).await {
            return Err(ProviderError::CredentialNotFound(path.to_path_buf()));
        }

        let http = self.http_client()?;
        let auth = ServiceAccountAuth::from_file(path, SPREADSHEETS_SCOPE, http.clone())
            .await
            .map_err(|e| ProviderError::InvalidCredential {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // The one network round trip of construction: proves the key is accepted.
        auth.access_token()
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;

        tracing::info!(
            "Authenticated to Google Sheets as {} ({})",
            auth.client_email(),
            self.config.api_base
        );

        let client = GoogleSheetsClient::new(http, &self.config.api_base, Box::new(auth))
            .map_err(ProviderError::Upstream)?;
        Ok(Box::new(client))
    }
}
