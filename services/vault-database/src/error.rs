//! Engine outcomes as module results

use adapter_vault::{DEFAULT_MOUNT_POINT, VaultError, VaultResponse};
use bootstrap::{ModuleFailure, ModuleSuccess};
use errors::AppError;
use serde_json::{Value, json};

pub(crate) fn default_mount_point() -> String {
    DEFAULT_MOUNT_POINT.to_string()
}

/// Map a Vault error to a failure naming the requested path
pub(crate) fn engine_failure(err: VaultError, path: &str) -> ModuleFailure {
    let error = match &err {
        VaultError::InvalidRequest { errors } => AppError::rejected(format!(
            "Vault rejected the request to path ['{}']: {}",
            path,
            errors.join("; ")
        )),
        VaultError::Unauthorized { .. } => AppError::authentication(format!(
            "Missing or invalid Vault token for path ['{}'].",
            path
        )),
        VaultError::Forbidden { .. } => {
            AppError::forbidden(format!("Forbidden: Permission Denied to path ['{}'].", path))
        }
        VaultError::InvalidPath { .. } => {
            AppError::invalid_path(format!("Invalid or missing path ['{}']. Check the path.", path))
        }
        VaultError::Unsupported { .. } => AppError::unsupported(format!(
            "Operation not supported at path ['{}'].",
            path
        )),
        VaultError::PreconditionFailed { .. } => AppError::unavailable(format!(
            "Vault could not serve path ['{}'] yet, the request precondition failed. Try again later.",
            path
        )),
        VaultError::RateLimited { .. } => AppError::unavailable(format!(
            "Rate limit exceeded for path ['{}'].",
            path
        )),
        VaultError::Server { status, errors } => AppError::unavailable(format!(
            "Vault server error ({}) for path ['{}']: {}",
            status,
            path,
            errors.join("; ")
        )),
        VaultError::NotInitialized { .. } => AppError::unavailable(format!(
            "Vault is not initialized, cannot reach path ['{}'].",
            path
        )),
        VaultError::Sealed { .. } => AppError::unavailable(format!(
            "Vault is sealed or down, cannot reach path ['{}'].",
            path
        )),
        VaultError::UnexpectedStatus { status, .. } => AppError::unexpected_status(format!(
            "Unexpected response from path ['{}']. Status code: {}",
            path, status
        )),
        VaultError::Transport(cause) => AppError::unavailable(format!(
            "Could not reach Vault for path ['{}']: {}",
            path, cause
        )),
        VaultError::Decode(cause) => AppError::internal(format!(
            "Undecodable Vault response for path ['{}']: {}",
            path, cause
        )),
    };

    ModuleFailure::new(error).with_exception(&err)
}

/// Writes report the status Vault answered with; only 200 and 204 count
pub(crate) fn write_success(
    response: &VaultResponse,
    action: &str,
) -> Result<ModuleSuccess, ModuleFailure> {
    if !matches!(response.status_code, 200 | 204) {
        return Err(AppError::unexpected_status(format!(
            "Failed to {}. Status code: {}",
            action, response.status_code
        ))
        .into());
    }

    Ok(ModuleSuccess::changed(json!({
        "status": "success",
        "status_code": response.status_code,
        "ok": response.ok,
    })))
}

/// Reads return the envelope's `data` next to the whole envelope
pub(crate) fn read_success(response: VaultResponse, path: &str) -> Result<ModuleSuccess, ModuleFailure> {
    let data = response.data().cloned().ok_or_else(|| {
        AppError::internal(format!("Vault returned no data for path ['{}'].", path))
    })?;

    Ok(ModuleSuccess::unchanged(data).with_raw(response.body.unwrap_or(Value::Null)))
}
