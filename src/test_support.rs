// Shared test fixtures: a local HTTP stub standing in for Google's token and
// Sheets endpoints, and scripted fakes for the core sheets traits.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use async_trait::async_trait;
use serde_json::Value;
use tiny_http::{Header, Response, Server};

use crate::core::sheets::{
    CellGrid, ClientFactory, ProviderError, SheetsClient, UpdateSummary, UpstreamError,
    ValueInputOption, ValueRenderOption,
};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, exactly as received.
    pub url: String,
    pub body: String,
    pub authorization: Option<String>,
}

/// Answers every request with whatever `responder` returns and records it.
pub struct StubServer {
    pub base_url: String,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let recorded = RecordedRequest {
                        method: request.method().to_string(),
                        url: request.url().to_string(),
                        body,
                        authorization: request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv("Authorization"))
                            .map(|h| h.value.as_str().to_string()),
                    };

                    let (status, payload) = responder(&recorded);
                    requests.lock().unwrap().push(recorded);

                    let content_type =
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                    let response = Response::from_string(payload)
                        .with_status_code(status)
                        .with_header(content_type);
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            base_url: format!("http://{addr}"),
            server,
            requests,
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Service account key JSON pointing its token endpoint at `token_uri`.
pub fn service_account_json(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "sheets-test",
        "private_key_id": "0123456789abcdef",
        "private_key": include_str!("infra/google_auth/testdata/service_account_key.pem"),
        "client_email": "sheets-bot@sheets-test.iam.gserviceaccount.com",
        "client_id": "1234567890",
        "token_uri": token_uri,
    })
    .to_string()
}

pub const TEST_PUBLIC_KEY_PEM: &str =
    include_str!("infra/google_auth/testdata/service_account_key.pub.pem");

/// Google-style API error with a matching JSON envelope as the body.
pub fn api_error(status: u16, code: &str, message: &str) -> UpstreamError {
    UpstreamError::Api {
        status,
        code: Some(code.to_string()),
        message: message.to_string(),
        body: format!(r#"{{"error":{{"code":{status},"message":"{message}","status":"{code}"}}}}"#),
    }
}

/// Scripted `SheetsClient`: every call returns the configured result.
#[derive(Clone)]
pub struct FakeClient {
    pub titles: Result<Vec<Option<String>>, UpstreamError>,
    pub values: Result<Vec<Vec<Value>>, UpstreamError>,
    pub update: Result<UpdateSummary, UpstreamError>,
    pub writes: Arc<Mutex<Vec<(String, CellGrid, ValueInputOption)>>>,
}

impl FakeClient {
    pub fn ok() -> Self {
        Self {
            titles: Ok(vec![]),
            values: Ok(vec![]),
            update: Ok(UpdateSummary {
                updated_cells: 0,
                updated_range: String::new(),
            }),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(err: UpstreamError) -> Self {
        Self {
            titles: Err(err.clone()),
            values: Err(err.clone()),
            update: Err(err),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl SheetsClient for FakeClient {
    async fn sheet_titles(&self, _: &str) -> Result<Vec<Option<String>>, UpstreamError> {
        self.titles.clone()
    }

    async fn get_values(
        &self,
        _: &str,
        _: &str,
        _: ValueRenderOption,
    ) -> Result<Vec<Vec<Value>>, UpstreamError> {
        self.values.clone()
    }

    async fn update_values(
        &self,
        _: &str,
        range: &str,
        values: &CellGrid,
        input: ValueInputOption,
    ) -> Result<UpdateSummary, UpstreamError> {
        self.writes
            .lock()
            .unwrap()
            .push((range.to_string(), values.clone(), input));
        self.update.clone()
    }
}

/// Hands out clones of one fake client and counts constructions.
pub struct FakeFactory {
    pub client: FakeClient,
    pub connects: Arc<AtomicUsize>,
    /// Number of leading `connect` calls that fail with a missing credential.
    pub failures_before_success: usize,
}

impl FakeFactory {
    pub fn new(client: FakeClient) -> Self {
        Self {
            client,
            connects: Arc::new(AtomicUsize::new(0)),
            failures_before_success: 0,
        }
    }
}

#[async_trait]
impl ClientFactory for FakeFactory {
    async fn connect(&self) -> Result<Box<dyn SheetsClient>, ProviderError> {
        let attempt = self.connects.fetch_add(1, Ordering::SeqCst);
        // Give concurrent callers a chance to pile up behind the first one.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        if attempt < self.failures_before_success {
            return Err(ProviderError::CredentialNotFound(PathBuf::from(
                "/missing/key.json",
            )));
        }
        Ok(Box::new(self.client.clone()))
    }
}
