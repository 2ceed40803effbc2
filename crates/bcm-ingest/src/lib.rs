#![deny(unsafe_code)]

//! Client side of the ingestion boundary.
//!
//! The engine never parses CSV bytes itself; the selected file goes to a
//! remote "parse CSV" operation that returns the column header labels. This
//! crate owns the upload wrapper, the wire model, the HTTP client and the
//! [`IngestBackend`] seam that lets a session run against a mock parser.

pub mod client;
pub mod error;
pub mod response;
pub mod upload;

pub use client::{AuthContext, HttpIngestClient, IngestBackend};
pub use error::{IngestError, Result};
pub use response::{ParseCsvResponse, ParsedCsv, headers_from_labels};
pub use upload::CsvUpload;
