use std::process::ExitCode;

use vault_database::ConnectionConfigure;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    bootstrap::run(ConnectionConfigure).await
}
