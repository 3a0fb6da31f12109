//! Root credential rotation

use adapter_vault::{DatabaseEngine, VaultError};
use async_trait::async_trait;
use bootstrap::{Access, Module, ModuleFailure, ModuleSuccess};
use errors::AppError;
use serde::Deserialize;
use tracing::info;

use crate::error::{default_mount_point, engine_failure, write_success};

#[derive(Debug, Clone, Deserialize)]
pub struct RotateRootCredentialsParams {
    #[serde(default = "default_mount_point")]
    pub engine_mount_point: String,
    pub connection_name: String,
}

/// Trigger rotation of a connection's root credentials
///
/// Vault only confirms that the rotation was accepted. The new password is
/// never returned.
pub struct RotateRootCredentials;

#[async_trait]
impl Module for RotateRootCredentials {
    type Params = RotateRootCredentialsParams;
    const NAME: &'static str = "vault_database_rotate_root_credentials";
    const ACCESS: Access = Access::Write;

    async fn execute(
        &self,
        engine: &dyn DatabaseEngine,
        params: Self::Params,
    ) -> Result<ModuleSuccess, ModuleFailure> {
        let mount = &params.engine_mount_point;
        info!(mount = %mount, connection_name = %params.connection_name, "Rotating root credentials");

        let response = match engine.rotate_root_credentials(mount, &params.connection_name).await {
            Ok(response) => response,
            Err(err @ VaultError::Unsupported { .. }) => {
                let error = AppError::unsupported(format!(
                    "Root credential rotation is not available at mount point ['{}']. \
                     The database secrets engine there must support rotate-root.",
                    mount
                ));
                return Err(ModuleFailure::new(error).with_exception(&err));
            }
            Err(err) => return Err(engine_failure(err, mount)),
        };

        write_success(&response, "rotate root credentials")
    }
}
