//! Transient user-facing notices.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::error::RosterError;
use crate::store::SubmitOutcome;

/// How long a notice stays visible unless configured otherwise.
pub const DEFAULT_DISPLAY_MS: u64 = 3000;

pub const REGISTERED: &str = "Student registered successfully!";
pub const DELETED: &str = "Student deleted successfully!";
pub const PERFORMANCE_ADDED: &str = "Performance added successfully!";
pub const PERFORMANCE_UPDATED: &str = "Performance updated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outcome message for the end user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Whether the notice should have disappeared by `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>, display_ms: u64) -> bool {
        let display = Duration::milliseconds(i64::try_from(display_ms).unwrap_or(i64::MAX));
        now - self.created_at >= display
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

impl From<&RosterError> for Notice {
    fn from(err: &RosterError) -> Self {
        Notice::error(err.to_string())
    }
}

impl From<SubmitOutcome> for Notice {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Added => Notice::success(PERFORMANCE_ADDED),
            SubmitOutcome::Updated => Notice::success(PERFORMANCE_UPDATED),
        }
    }
}
