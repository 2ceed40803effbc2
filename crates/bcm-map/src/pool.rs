//! The pool of source headers still available for mapping.
//!
//! Headers enter the pool in one batch when a CSV is ingested and leave it
//! one at a time as they are bound to target fields. A cleared binding puts
//! its header back. Insertion order is preserved so the pool renders and
//! tests deterministically.

use bcm_model::{HeaderId, SourceHeader};
use tracing::error;

use crate::error::{MapError, Result};

/// Ordered collection of unconsumed source headers.
#[derive(Debug, Clone, Default)]
pub struct HeaderPool {
    headers: Vec<SourceHeader>,
}

impl HeaderPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pool contents wholesale with a fresh ingestion batch.
    ///
    /// Fails with `DuplicateHeader` if the batch repeats an identity; the
    /// pool is left unchanged in that case.
    pub fn load(&mut self, headers: Vec<SourceHeader>) -> Result<()> {
        for (i, header) in headers.iter().enumerate() {
            if headers[..i].iter().any(|h| h.id == header.id) {
                error!(header = %header.id, "rejecting load: duplicate header identity");
                return Err(MapError::DuplicateHeader(header.id.clone()));
            }
        }
        self.headers = headers;
        Ok(())
    }

    /// Remove and return the header with this identity.
    pub fn take(&mut self, id: &HeaderId) -> Result<SourceHeader> {
        match self.headers.iter().position(|h| &h.id == id) {
            Some(idx) => Ok(self.headers.remove(idx)),
            None => {
                error!(header = %id, "take refused: header not in pool");
                Err(MapError::HeaderNotFound(id.clone()))
            }
        }
    }

    /// Reinsert a header, appending it in arrival order.
    ///
    /// Fails with `DuplicateHeader` if the identity is already present,
    /// which guards against double-restore.
    pub fn restore(&mut self, header: SourceHeader) -> Result<()> {
        if self.contains(&header.id) {
            error!(header = %header.id, "restore refused: header already in pool");
            return Err(MapError::DuplicateHeader(header.id));
        }
        self.headers.push(header);
        Ok(())
    }

    /// Current pool contents in insertion order.
    pub fn snapshot(&self) -> &[SourceHeader] {
        &self.headers
    }

    pub fn contains(&self, id: &HeaderId) -> bool {
        self.headers.iter().any(|h| &h.id == id)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}
