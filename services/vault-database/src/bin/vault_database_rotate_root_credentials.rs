use std::process::ExitCode;

use vault_database::RotateRootCredentials;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    bootstrap::run(RotateRootCredentials).await
}
