//! Wizard step state machine.
//!
//! Sequences platform selection, upload and mapping. `Uploading` is the
//! sub-state of the upload step entered while an ingestion is in flight;
//! the transition into `Mapping` happens only once ingestion succeeds and
//! the pool has been loaded, so it is driven by the session rather than by
//! this type.

use std::fmt;

use bcm_model::Platform;

use crate::error::{Result, WizardError};

/// Current step in the migration wizard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    /// Step 1: choose the source platform.
    #[default]
    SelectingPlatform,
    /// Step 2: supply a CSV export.
    AwaitingUpload,
    /// Step 2 while the ingestion request is outstanding.
    Uploading,
    /// Step 3: map discovered columns to target fields.
    Mapping,
}

impl WizardStep {
    /// Human-readable step name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SelectingPlatform => "Select platform",
            Self::AwaitingUpload => "Upload CSV",
            Self::Uploading => "Uploading...",
            Self::Mapping => "Map fields",
        }
    }

    /// 1-based position in the three-step indicator. `Uploading` renders
    /// as step 2.
    pub fn number(&self) -> u8 {
        match self {
            Self::SelectingPlatform => 1,
            Self::AwaitingUpload | Self::Uploading => 2,
            Self::Mapping => 3,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The wizard's navigation state plus the data entered at each step.
///
/// Backward navigation keeps the entered data so it can be re-displayed;
/// only a new ingestion replaces discovered headers.
#[derive(Debug, Default, Clone)]
pub struct Wizard {
    step: WizardStep,
    platform: Option<Platform>,
    file_name: Option<String>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The platform entered at step 1, preserved across navigation.
    pub fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }

    /// The file selected at step 2, preserved across navigation.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Record the platform choice. Only meaningful at step 1.
    pub fn select_platform(&mut self, platform: Platform) -> Result<()> {
        self.require_step(WizardStep::SelectingPlatform)?;
        self.platform = Some(platform);
        Ok(())
    }

    /// Record the selected file name. Only meaningful at step 2.
    pub fn select_file(&mut self, file_name: impl Into<String>) -> Result<()> {
        self.require_step(WizardStep::AwaitingUpload)?;
        self.file_name = Some(file_name.into());
        Ok(())
    }

    /// Whether the forward transition out of the current step is allowed.
    /// Callers use this to disable the "continue" control; the transition
    /// methods enforce the same guards.
    pub fn can_continue(&self) -> bool {
        match self.step {
            WizardStep::SelectingPlatform => {
                self.platform.as_ref().is_some_and(Platform::is_valid)
            }
            WizardStep::AwaitingUpload => self.file_name.is_some(),
            // continue is disabled while uploading; leaving Mapping is the
            // submit action, gated by the session on required fields
            WizardStep::Uploading | WizardStep::Mapping => false,
        }
    }

    /// Step 1 -> step 2. A no-op when already at or past the upload step.
    pub fn advance_to_upload(&mut self) -> Result<()> {
        if self.step >= WizardStep::AwaitingUpload {
            return Ok(());
        }
        if !self.can_continue() {
            return Err(WizardError::PlatformRequired);
        }
        self.step = WizardStep::AwaitingUpload;
        Ok(())
    }

    /// Enter the uploading sub-state. Requires a selected file.
    pub fn begin_upload(&mut self) -> Result<()> {
        self.require_step(WizardStep::AwaitingUpload)?;
        if self.file_name.is_none() {
            return Err(WizardError::FileRequired);
        }
        self.step = WizardStep::Uploading;
        Ok(())
    }

    /// Leave the uploading sub-state: forward into mapping on success,
    /// back to the upload step on failure.
    pub fn finish_upload(&mut self, success: bool) -> Result<()> {
        self.require_step(WizardStep::Uploading)?;
        self.step = if success {
            WizardStep::Mapping
        } else {
            WizardStep::AwaitingUpload
        };
        Ok(())
    }

    /// Navigate one step back. Always permitted; entered data survives.
    /// Backing out of `Uploading` abandons the in-flight ingestion (the
    /// session invalidates its ticket). A no-op at step 1.
    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::SelectingPlatform => WizardStep::SelectingPlatform,
            WizardStep::AwaitingUpload => WizardStep::SelectingPlatform,
            WizardStep::Uploading | WizardStep::Mapping => WizardStep::AwaitingUpload,
        };
    }

    fn require_step(&self, expected: WizardStep) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::StepMismatch {
                expected,
                actual: self.step,
            })
        }
    }
}
