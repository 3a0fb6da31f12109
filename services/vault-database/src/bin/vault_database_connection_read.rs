use std::process::ExitCode;

use vault_database::ConnectionRead;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    bootstrap::run(ConnectionRead).await
}
