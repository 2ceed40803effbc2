//! Wire model of the parse endpoint and conversion into source headers.

use bcm_model::{HeaderId, SourceHeader};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// JSON body returned by the remote "parse CSV" operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseCsvResponse {
    /// Column header labels in file order.
    pub headers: Vec<String>,
    /// Human-readable status message meant for the notification layer.
    #[serde(default)]
    pub message: String,
}

/// Result of a successful ingestion, ready to load into the header pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    /// One header per column, in the order the parser reported them.
    pub headers: Vec<SourceHeader>,
    /// Status message forwarded from the server.
    pub message: String,
}

/// Synthesize pool entries from the labels the parser reported.
///
/// The response carries only display labels, so identities are derived from
/// position (`header_0`, `header_1`, ...). That makes them unique by
/// construction even when two columns share a label. An empty list is an
/// ingestion failure, not an empty success.
pub fn headers_from_labels(labels: &[String]) -> Result<Vec<SourceHeader>> {
    if labels.is_empty() {
        return Err(IngestError::EmptyHeaderList);
    }
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let id = HeaderId::new(format!("header_{index}"))
                .map_err(|e| IngestError::InvalidResponse(e.to_string()))?;
            Ok(SourceHeader::new(id, label.clone()))
        })
        .collect()
}

impl ParseCsvResponse {
    /// Convert the wire response into pool-ready headers.
    pub fn into_parsed(self) -> Result<ParsedCsv> {
        let headers = headers_from_labels(&self.headers)?;
        Ok(ParsedCsv {
            headers,
            message: self.message,
        })
    }
}
