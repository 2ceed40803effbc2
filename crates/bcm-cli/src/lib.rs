//! CLI library components for the catalog migrator.

pub mod logging;
pub mod render;
