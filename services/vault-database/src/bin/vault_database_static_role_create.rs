use std::process::ExitCode;

use vault_database::StaticRoleCreate;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    bootstrap::run(StaticRoleCreate).await
}
