#![deny(unsafe_code)]

//! Wizard state machine and migration session.
//!
//! [`Wizard`] sequences the three steps of the guided migration and holds
//! the data entered at each one; [`MigrationSession`] layers the header
//! pool, mapping table, ingestion bookkeeping and progress computation on
//! top of it.

pub mod error;
pub mod session;
pub mod step;

pub use error::{Result, WizardError};
pub use session::{IngestOutcome, IngestTicket, MigrationSession};
pub use step::{Wizard, WizardStep};
