//! Dynamic role modules

use adapter_vault::{DatabaseEngine, RoleDefinition};
use async_trait::async_trait;
use bootstrap::{Access, Module, ModuleFailure, ModuleSuccess};
use serde::Deserialize;
use tracing::debug;

use crate::error::{engine_failure, write_success};

fn default_ttl() -> u64 {
    3600
}

fn default_max_ttl() -> u64 {
    86400
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleCreateParams {
    pub path: String,
    pub connection_name: String,
    pub role_name: String,
    pub creation_statements: Vec<String>,
    pub revocation_statements: Option<Vec<String>>,
    pub rollback_statements: Option<Vec<String>>,
    pub renew_statements: Option<Vec<String>>,
    #[serde(default = "default_ttl")]
    pub default_ttl: u64,
    #[serde(default = "default_max_ttl")]
    pub max_ttl: u64,
}

/// Create or update a dynamic role
pub struct RoleCreate;

#[async_trait]
impl Module for RoleCreate {
    type Params = RoleCreateParams;
    const NAME: &'static str = "vault_database_role_create";
    const ACCESS: Access = Access::Write;

    async fn execute(
        &self,
        engine: &dyn DatabaseEngine,
        params: Self::Params,
    ) -> Result<ModuleSuccess, ModuleFailure> {
        debug!(path = %params.path, role_name = %params.role_name, "Writing role");

        let role = RoleDefinition {
            db_name: params.connection_name,
            creation_statements: params.creation_statements,
            revocation_statements: params.revocation_statements,
            rollback_statements: params.rollback_statements,
            renew_statements: params.renew_statements,
            default_ttl: params.default_ttl,
            max_ttl: params.max_ttl,
        };

        let response = engine
            .create_role(&params.path, &params.role_name, &role)
            .await
            .map_err(|e| engine_failure(e, &params.path))?;

        write_success(&response, "create role")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleDeleteParams {
    pub path: String,
    pub role_name: String,
}

/// Delete a dynamic role
pub struct RoleDelete;

#[async_trait]
impl Module for RoleDelete {
    type Params = RoleDeleteParams;
    const NAME: &'static str = "vault_database_role_delete";
    const ACCESS: Access = Access::Write;

    async fn execute(
        &self,
        engine: &dyn DatabaseEngine,
        params: Self::Params,
    ) -> Result<ModuleSuccess, ModuleFailure> {
        let response = engine
            .delete_role(&params.path, &params.role_name)
            .await
            .map_err(|e| engine_failure(e, &params.path))?;

        write_success(&response, "delete role")
    }
}
