#![deny(unsafe_code)]

//! Header pool and mapping table for the catalog migration engine.
//!
//! The two structures partition the headers of the current import: at any
//! moment each header identity is either in the [`HeaderPool`] or bound in
//! the [`MappingTable`] to exactly one target field, never both. They never
//! call each other; a coordinating session moves headers between them so
//! each side stays independently testable.

pub mod error;
pub mod pool;
pub mod table;

pub use error::{MapError, Result};
pub use pool::HeaderPool;
pub use table::MappingTable;
