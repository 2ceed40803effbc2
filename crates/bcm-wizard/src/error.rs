//! Error types for the wizard and session layer.

use bcm_ingest::IngestError;
use bcm_map::MapError;
use thiserror::Error;

use crate::step::WizardStep;

#[derive(Debug, Error)]
pub enum WizardError {
    /// Structural pool/table error; indicates a coordinator bug.
    #[error(transparent)]
    Map(#[from] MapError),

    /// The remote parser rejected the upload or could not be reached.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// An ingestion attempt is already outstanding for this session.
    #[error("an ingestion is already in progress")]
    IngestionInProgress,

    /// The operation is not available at the current wizard step.
    #[error("operation requires step {expected}, current step is {actual}")]
    StepMismatch {
        expected: WizardStep,
        actual: WizardStep,
    },

    /// Continuing past platform selection requires a valid selection.
    #[error("a source platform must be selected")]
    PlatformRequired,

    /// Starting an upload requires a selected file.
    #[error("a CSV file must be selected")]
    FileRequired,
}

pub type Result<T> = std::result::Result<T, WizardError>;
