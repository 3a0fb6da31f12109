//! vaultdb-bootstrap - shared skeleton of every module executable
//!
//! Each binary hands its [`Module`] to [`run`], which resolves the
//! invocation, connects to Vault, dispatches and prints the result.

mod module;
mod report;
mod runtime;
mod starter;

pub use module::*;
pub use report::*;
pub use runtime::*;
pub use starter::*;
