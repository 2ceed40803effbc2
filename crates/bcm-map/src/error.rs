//! Error types for pool and table operations.
//!
//! These are structural errors: hitting one means the calling layer tried
//! an operation the current pool/table state does not allow (for example
//! taking a header that was already consumed). They are refused without
//! touching state.

use bcm_model::{FieldId, HeaderId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A header with this identity is already present.
    #[error("duplicate header identity: {0}")]
    DuplicateHeader(HeaderId),

    /// No header with this identity is in the pool.
    #[error("header not found: {0}")]
    HeaderNotFound(HeaderId),

    /// The target field id is not part of the schema.
    #[error("unknown target field: {0}")]
    UnknownTargetField(FieldId),

    /// Nothing is bound to the target field.
    #[error("no header bound to target field: {0}")]
    NotBound(FieldId),
}

pub type Result<T> = std::result::Result<T, MapError>;
