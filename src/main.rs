//! Contact Gate - Entry Point
//!
//! Serves the rate-limited contact form endpoint.

use contact_gate::Server;
use contact_gate::config::ServerConfig;
use contact_gate::error::{ContactServerError, handle_error};
use log::info;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching contact gate...");

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ContactServerError> {
    let config = ServerConfig::load()?;
    let server = Server::new(config).await?;
    server.start().await
}
