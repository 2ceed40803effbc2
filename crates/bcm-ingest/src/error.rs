//! Error types for CSV ingestion.

use thiserror::Error;

/// Errors that can occur while submitting a CSV to the remote parser.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// Server responded with a non-success status.
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The parser reported no columns.
    #[error("the parsed CSV contains no columns")]
    EmptyHeaderList,

    /// The selected file is not a CSV.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// I/O error reading the selected file.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl IngestError {
    /// A message suitable for the notification layer.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Could not reach the import service. Please check your connection.".to_string()
            }
            Self::Status { message, .. } => format!("Import failed: {message}"),
            Self::InvalidResponse(_) => "The import service sent an unexpected reply.".to_string(),
            Self::EmptyHeaderList => "No columns were found in the uploaded file.".to_string(),
            Self::UnsupportedFileType(name) => format!("{name} is not a CSV file."),
            Self::Io { path, .. } => format!("Could not read {path}."),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
