//! The file handed to the ingestion endpoint.

use std::fs;
use std::path::Path;

use crate::error::{IngestError, Result};

/// A CSV export selected for upload: the original file name plus its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl CsvUpload {
    /// Wrap selected file content. The file name must end in `.csv`
    /// (case-insensitive), mirroring the upload picker's filter.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let is_csv = Path::new(&file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(IngestError::UnsupportedFileType(file_name));
        }
        Ok(Self { file_name, bytes })
    }

    /// Read a CSV file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| IngestError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
