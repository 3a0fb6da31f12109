//! Static role modules

use adapter_vault::{DatabaseEngine, StaticRoleDefinition, VaultError};
use async_trait::async_trait;
use bootstrap::{Access, Module, ModuleFailure, ModuleSuccess};
use errors::AppError;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{default_mount_point, engine_failure, read_success, write_success};

fn default_rotation_period() -> u64 {
    86400
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticRoleCreateParams {
    #[serde(default = "default_mount_point", alias = "path")]
    pub engine_mount_point: String,
    pub connection_name: String,
    pub role_name: String,
    /// Existing database user the role manages
    pub db_username: String,
    pub rotation_statements: Vec<String>,
    /// Seconds
    #[serde(default = "default_rotation_period")]
    pub rotation_period: u64,
}

/// Create or update a static role
pub struct StaticRoleCreate;

#[async_trait]
impl Module for StaticRoleCreate {
    type Params = StaticRoleCreateParams;
    const NAME: &'static str = "vault_database_static_role_create";
    const ACCESS: Access = Access::Write;

    async fn execute(
        &self,
        engine: &dyn DatabaseEngine,
        params: Self::Params,
    ) -> Result<ModuleSuccess, ModuleFailure> {
        let mount = &params.engine_mount_point;
        debug!(
            mount = %mount,
            role_name = %params.role_name,
            db_username = %params.db_username,
            "Writing static role"
        );

        let role = StaticRoleDefinition {
            db_name: params.connection_name.clone(),
            username: params.db_username.clone(),
            rotation_statements: params.rotation_statements.clone(),
            rotation_period: params.rotation_period,
        };

        let response = match engine.create_static_role(mount, &params.role_name, &role).await {
            Ok(response) => response,
            // Vault answers 400 or 500 depending on where the plugin rejects the user.
            Err(err @ (VaultError::InvalidRequest { .. } | VaultError::Server { .. }))
                if err.mentions("does not exist") =>
            {
                let error = AppError::rejected(format!(
                    "The database user '{}' for static role '{}' at mount point ['{}'] does not exist. \
                     Create the user in the database first, then create the static role.",
                    params.db_username, params.role_name, mount
                ));
                return Err(ModuleFailure::new(error).with_exception(&err));
            }
            Err(err) => return Err(engine_failure(err, mount)),
        };

        let raw = response.body.clone().unwrap_or(Value::Null);
        Ok(write_success(&response, "create static role")?.with_raw(raw))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticRoleReadParams {
    pub path: String,
    pub role_name: String,
}

/// Read a static role definition
pub struct StaticRoleRead;

#[async_trait]
impl Module for StaticRoleRead {
    type Params = StaticRoleReadParams;
    const NAME: &'static str = "vault_database_static_role_read";
    const ACCESS: Access = Access::Read;

    async fn execute(
        &self,
        engine: &dyn DatabaseEngine,
        params: Self::Params,
    ) -> Result<ModuleSuccess, ModuleFailure> {
        let response = engine
            .read_static_role(&params.path, &params.role_name)
            .await
            .map_err(|e| engine_failure(e, &params.path))?;

        read_success(response, &params.path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticRolesListParams {
    #[serde(default = "default_mount_point", alias = "path")]
    pub engine_mount_point: String,
}

/// List static roles
pub struct StaticRolesList;

#[async_trait]
impl Module for StaticRolesList {
    type Params = StaticRolesListParams;
    const NAME: &'static str = "vault_database_static_roles_list";
    const ACCESS: Access = Access::Read;

    async fn execute(
        &self,
        engine: &dyn DatabaseEngine,
        params: Self::Params,
    ) -> Result<ModuleSuccess, ModuleFailure> {
        let mount = &params.engine_mount_point;
        let response = engine
            .list_static_roles(mount)
            .await
            .map_err(|e| engine_failure(e, mount))?;

        read_success(response, mount)
    }
}
