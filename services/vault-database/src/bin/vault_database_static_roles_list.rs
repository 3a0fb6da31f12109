use std::process::ExitCode;

use vault_database::StaticRolesList;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    bootstrap::run(StaticRolesList).await
}
