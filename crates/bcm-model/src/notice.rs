//! Notification boundary.
//!
//! The engine never renders anything; on ingestion success/failure and on
//! reset it hands a message and severity to a sink supplied by the embedder
//! (a toast layer, a log, a test buffer).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// A message destined for the external notification layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Receives notices emitted by the engine.
pub trait NotificationSink {
    fn notify(&mut self, notice: Notice);
}

/// Sink that buffers notices in memory. Used by tests and by the CLI, which
/// drains it after each engine call.
#[derive(Debug, Default)]
pub struct BufferedSink {
    notices: Vec<Notice>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all buffered notices.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl NotificationSink for BufferedSink {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
