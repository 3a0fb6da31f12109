use std::process::ExitCode;

use vault_database::ConnectionsList;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    bootstrap::run(ConnectionsList).await
}
