//! vaultdb-errors - unified error handling
//!
//! Every module invocation that fails ends with an [`AppError`], which is
//! rendered into the [`FailureReport`] document the host framework reads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error type
///
/// The display form of each variant is the operator-facing message, so
/// constructors take the complete sentence rather than a fragment.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidPath(String),

    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Unsupported(String),

    #[error("{0}")]
    UnexpectedStatus(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn unexpected_status(msg: impl Into<String>) -> Self {
        Self::UnexpectedStatus(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Authentication(_) => "authentication",
            Self::Forbidden(_) => "forbidden",
            Self::InvalidPath(_) => "invalid_path",
            Self::Rejected(_) => "rejected",
            Self::Unsupported(_) => "unsupported",
            Self::UnexpectedStatus(_) => "unexpected_status",
            Self::Unavailable(_) => "unavailable",
            Self::Internal(_) => "internal",
        }
    }

    /// Convert into the failure document emitted on stdout
    pub fn to_failure_report(&self) -> FailureReport {
        FailureReport {
            failed: true,
            msg: self.to_string(),
            error_kind: self.kind().to_string(),
            status: self.report_status().map(str::to_string),
            exception: None,
        }
    }

    // Status-code failures keep the `status` marker the host playbooks match on.
    fn report_status(&self) -> Option<&'static str> {
        match self {
            Self::UnexpectedStatus(_) => Some("failure"),
            _ => None,
        }
    }
}

/// Failure document of a module invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub failed: bool,
    pub msg: String,
    pub error_kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl FailureReport {
    /// Attach diagnostic detail about the underlying cause
    pub fn with_exception(mut self, exception: impl Into<String>) -> Self {
        self.exception = Some(exception.into());
        self
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
