use std::process::ExitCode;

use vault_database::RoleCreate;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    bootstrap::run(RoleCreate).await
}
