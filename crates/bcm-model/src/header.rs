//! Source CSV header representation.

use serde::{Deserialize, Serialize};

use crate::ids::HeaderId;

/// A column discovered in the uploaded CSV.
///
/// Headers are created in a batch when a CSV is ingested and live either in
/// the header pool or inside exactly one mapping binding, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHeader {
    /// Stable identity within the current import.
    pub id: HeaderId,
    /// Display label as reported by the parser.
    pub label: String,
    /// Sample value from the first data row, for preview.
    pub preview: Option<String>,
}

impl SourceHeader {
    pub fn new(id: HeaderId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            preview: None,
        }
    }

    #[must_use]
    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }
}
