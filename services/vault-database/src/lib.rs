//! Host modules for the Vault database secrets engine
//!
//! One [`Module`](bootstrap::Module) per engine operation. The binaries under
//! `src/bin` wire each of them to [`bootstrap::run`].

mod connection;
mod error;
mod role;
mod rotate;
mod static_role;

pub use connection::{
    ConnectionConfigure, ConnectionConfigureParams, ConnectionRead, ConnectionReadParams,
    ConnectionsList, ConnectionsListParams,
};
pub use role::{RoleCreate, RoleCreateParams, RoleDelete, RoleDeleteParams};
pub use rotate::{RotateRootCredentials, RotateRootCredentialsParams};
pub use static_role::{
    StaticRoleCreate, StaticRoleCreateParams, StaticRoleRead, StaticRoleReadParams,
    StaticRolesList, StaticRolesListParams,
};
