use std::process::ExitCode;

use vault_database::RoleDelete;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    bootstrap::run(RoleDelete).await
}
