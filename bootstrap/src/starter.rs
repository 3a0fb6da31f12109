//! Module starter
//!
//! Runs one invocation end to end:
//! 1. load telemetry settings and initialise tracing
//! 2. resolve the invocation from the args file and the environment
//! 3. validate connection options and authenticate
//! 4. skip writes in check mode, otherwise execute the module
//! 5. print the result document

use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use adapter_vault::{DatabaseEngine, VaultClient, VaultConfig};
use config::{ConnectionOptions, Invocation, TelemetryConfig};
use errors::{AppError, AppResult};
use tracing::{info, warn};

use crate::module::{Access, Module, ModuleSuccess};
use crate::report::ModuleResult;
use crate::runtime::init_runtime;

/// Entry point of every module binary
///
/// # Example
///
/// ```ignore
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> ExitCode {
///     bootstrap::run(ConnectionRead).await
/// }
/// ```
pub async fn run<M: Module>(module: M) -> ExitCode {
    let telemetry = TelemetryConfig::load();
    init_runtime(telemetry.as_ref().unwrap_or(&TelemetryConfig::default()));
    if let Err(e) = &telemetry {
        warn!(error = %e, "Invalid telemetry settings, using defaults");
    }

    let result = match args_file(std::env::args_os()) {
        Ok(path) => execute_file(&module, path).await,
        Err(e) => e.into(),
    };

    result.emit()
}

/// The host passes the args file as the only argument
fn args_file(mut args: impl Iterator<Item = OsString>) -> AppResult<OsString> {
    let program = args.next();
    args.next().ok_or_else(|| {
        let program = program
            .as_deref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "module".to_string());
        AppError::validation(format!("Usage: {} <args-file>", program))
    })
}

/// Resolve the args file and execute the module
pub async fn execute_file<M: Module>(module: &M, args_file: impl AsRef<Path>) -> ModuleResult {
    match Invocation::<M::Params>::load(args_file) {
        Ok(invocation) => execute(module, invocation).await,
        Err(e) => AppError::validation(e.to_string()).into(),
    }
}

/// Authenticate against Vault and execute the module
pub async fn execute<M: Module>(module: &M, invocation: Invocation<M::Params>) -> ModuleResult {
    info!(module = M::NAME, check_mode = invocation.host.check_mode, "Running module");

    match connect(&invocation.connection).await {
        Ok(client) => dispatch(module, &client, invocation.host.check_mode, invocation.params).await,
        Err(e) => {
            warn!(module = M::NAME, error_kind = e.kind(), "Could not connect to Vault: {}", e);
            e.into()
        }
    }
}

async fn connect(options: &ConnectionOptions) -> AppResult<VaultClient> {
    let config = VaultConfig::try_from(options)?;
    VaultClient::new(config).await
}

/// Execute the module against an engine, honouring check mode
pub async fn dispatch<M: Module>(
    module: &M,
    engine: &dyn DatabaseEngine,
    check_mode: bool,
    params: M::Params,
) -> ModuleResult {
    if check_mode && M::ACCESS == Access::Write {
        info!(module = M::NAME, "Check mode, skipping write");
        return ModuleSuccess::check_mode().into();
    }

    match module.execute(engine, params).await {
        Ok(success) => {
            info!(module = M::NAME, changed = success.changed, "Module succeeded");
            success.into()
        }
        Err(failure) => {
            warn!(
                module = M::NAME,
                error_kind = failure.error.kind(),
                "Module failed: {}",
                failure.error
            );
            failure.into()
        }
    }
}
