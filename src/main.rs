//! # Agent Microsite Main Entry Point
//!
//! Loads configuration and runs the HTTP server until shutdown.

use microsite::{config::ConfigLoader, server::run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    // Tracing is not installed yet; report what was loaded on stdout
    println!("Loaded configuration for profile: {}", config.profile);
    if let Ok(redacted_json) = config.redacted_json() {
        println!("Configuration: {}", redacted_json);
    }

    run_server(config).await
}
