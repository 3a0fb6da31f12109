//! adapter-vault - HashiCorp Vault adapter
//!
//! Provides access to the database secrets engine with support for:
//! - Token, AppRole and userpass authentication
//! - Connection, static role and dynamic role management
//! - Typed Vault error kinds instead of string matching
//!
//! Enable the `mock` feature to get `MockDatabaseEngine` in downstream tests.

pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod response;

pub use client::VaultClient;
pub use self::config::{AuthMethod, VaultConfig, VaultConfigBuilder};
#[cfg(feature = "mock")]
pub use database::MockDatabaseEngine;
pub use database::{
    ConnectionConfig, DEFAULT_MOUNT_POINT, DatabaseEngine, RoleDefinition, StaticRoleDefinition,
};
pub use error::{VaultError, map_vault_error};
pub use response::VaultResponse;
