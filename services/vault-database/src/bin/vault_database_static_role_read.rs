use std::process::ExitCode;

use vault_database::StaticRoleRead;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    bootstrap::run(StaticRoleRead).await
}
