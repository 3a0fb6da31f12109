//! Result document written to stdout

use std::process::ExitCode;

use errors::{AppError, FailureReport};
use serde::Serialize;
use serde_json::json;

use crate::module::{ModuleFailure, ModuleSuccess};

/// Terminal outcome of one invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleResult {
    Success(ModuleSuccess),
    Failure(FailureReport),
}

impl ModuleResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Success(_) => ExitCode::SUCCESS,
            Self::Failure(_) => ExitCode::FAILURE,
        }
    }

    /// Single-line JSON document for the host framework
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            json!({
                "failed": true,
                "msg": format!("Failed to serialize module result: {}", e),
                "error_kind": "internal",
            })
            .to_string()
        })
    }

    /// Print the document on stdout and hand back the exit code
    pub fn emit(self) -> ExitCode {
        println!("{}", self.to_json());
        self.exit_code()
    }
}

impl From<ModuleSuccess> for ModuleResult {
    fn from(success: ModuleSuccess) -> Self {
        Self::Success(success)
    }
}

impl From<ModuleFailure> for ModuleResult {
    fn from(failure: ModuleFailure) -> Self {
        Self::Failure(failure.report())
    }
}

impl From<AppError> for ModuleResult {
    fn from(error: AppError) -> Self {
        Self::Failure(error.to_failure_report())
    }
}
