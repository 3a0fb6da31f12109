//! The contract every module implements

use std::fmt::Debug;

use adapter_vault::DatabaseEngine;
use async_trait::async_trait;
use errors::{AppError, FailureReport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Whether a module changes anything in Vault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// A single Vault operation exposed as a host module
#[async_trait]
pub trait Module: Send + Sync {
    /// Module parameters, extracted from the args file
    type Params: DeserializeOwned + Debug + Send;

    /// Executable name, used in logs
    const NAME: &'static str;

    /// Write modules are skipped in check mode
    const ACCESS: Access;

    /// Perform exactly one request against the engine
    async fn execute(
        &self,
        engine: &dyn DatabaseEngine,
        params: Self::Params,
    ) -> Result<ModuleSuccess, ModuleFailure>;
}

/// Successful module outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSuccess {
    pub changed: bool,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub check_mode: bool,
}

impl ModuleSuccess {
    pub fn changed(data: Value) -> Self {
        Self {
            changed: true,
            data,
            raw: None,
            check_mode: false,
        }
    }

    pub fn unchanged(data: Value) -> Self {
        Self {
            changed: false,
            ..Self::changed(data)
        }
    }

    /// Placeholder for a write skipped in check mode
    pub fn check_mode() -> Self {
        Self {
            check_mode: true,
            ..Self::changed(json!({}))
        }
    }

    /// Attach the raw Vault response
    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }
}

/// Failed module outcome
#[derive(Debug)]
pub struct ModuleFailure {
    pub error: AppError,
    /// Diagnostic form of the underlying cause
    pub exception: Option<String>,
}

impl ModuleFailure {
    pub fn new(error: AppError) -> Self {
        Self {
            error,
            exception: None,
        }
    }

    pub fn with_exception(mut self, cause: &impl Debug) -> Self {
        self.exception = Some(format!("{:?}", cause));
        self
    }

    pub fn report(&self) -> FailureReport {
        let report = self.error.to_failure_report();
        match &self.exception {
            Some(exception) => report.with_exception(exception.clone()),
            None => report,
        }
    }
}

impl From<AppError> for ModuleFailure {
    fn from(error: AppError) -> Self {
        Self::new(error)
    }
}
