//! HTTP client for the remote parse endpoint.
//!
//! Submits the selected CSV as a single-part multipart upload and decodes
//! the returned column list. The bearer credential comes from an explicit
//! [`AuthContext`] passed per call; this crate does not know how tokens are
//! obtained or refreshed.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::response::{ParseCsvResponse, ParsedCsv};
use crate::upload::CsvUpload;

/// Path of the parse operation relative to the service base URL.
const PARSE_CSV_PATH: &str = "migration/parse-csv";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Credential attached to outgoing requests, supplied by the embedding
/// auth layer.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    bearer_token: Option<String>,
}

impl AuthContext {
    /// Context without a credential (anonymous request).
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

/// Abstraction over the remote parser so sessions can be driven by a mock
/// in tests.
pub trait IngestBackend {
    /// Submit the file and return the discovered columns.
    ///
    /// All-or-nothing: any failure leaves the caller free to keep its
    /// current pool untouched.
    fn parse_csv(&self, auth: &AuthContext, upload: &CsvUpload) -> Result<ParsedCsv>;
}

/// Error body shape some endpoints return; used for message extraction.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// [`IngestBackend`] over HTTP.
pub struct HttpIngestClient {
    client: Client,
    base_url: String,
}

impl HttpIngestClient {
    /// Create a client for the given service base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IngestError::Network(e.to_string()))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { client, base_url })
    }

    fn parse_url(&self) -> String {
        format!("{}/{PARSE_CSV_PATH}", self.base_url)
    }

    /// Pull a human-readable message out of a non-success response body.
    fn error_message(body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if let Some(message) = parsed.message {
                return message;
            }
        }
        if body.trim().is_empty() {
            "unknown error".to_string()
        } else {
            body.trim().to_string()
        }
    }
}

impl IngestBackend for HttpIngestClient {
    fn parse_csv(&self, auth: &AuthContext, upload: &CsvUpload) -> Result<ParsedCsv> {
        debug!(file = upload.file_name(), "submitting CSV for parsing");

        let part = Part::bytes(upload.bytes().to_vec())
            .file_name(upload.file_name().to_string())
            .mime_str("text/csv")
            .map_err(|e| IngestError::Network(e.to_string()))?;
        let form = Form::new().part("file", part);

        let mut request = self
            .client
            .post(self.parse_url())
            .header(ACCEPT, "application/json")
            .multipart(form);
        if let Some(token) = auth.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| IngestError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = Self::error_message(&body);
            warn!(status = status.as_u16(), %message, "parse endpoint refused upload");
            return Err(IngestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: ParseCsvResponse = response
            .json()
            .map_err(|e| IngestError::InvalidResponse(e.to_string()))?;
        let parsed = body.into_parsed()?;
        debug!(columns = parsed.headers.len(), "parse endpoint returned columns");
        Ok(parsed)
    }
}
