//! Restaurant Desk - Main entry point
//!
//! Runs the desk as an MCP server over stdio.

use anyhow::Result;
use restaurant_desk::seed::seed_demo_data;
use restaurant_desk::services::{Clock, DeskServices};
use restaurant_desk::{Config, RestaurantDeskServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Configuration first so LOG_LEVEL can drive the default filter
    let config = Config::from_env();
    let level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Restaurant Desk: business hours {:02}:00-{:02}:00, prep lead {} min, buffer {} min",
        config.open_hour,
        config.close_hour,
        config.prep_lead_time_minutes,
        config.prep_safety_buffer_minutes
    );

    let clock = Clock::System;
    let services = DeskServices::in_memory(&config, clock);

    if config.seed_demo_data {
        seed_demo_data(&services, clock.today()).await?;
    }

    let server = RestaurantDeskServer::new(services, config);
    info!("Restaurant Desk initialized");

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    restaurant_desk::server::run_server(server).await?;

    info!("Restaurant Desk shutdown complete");
    Ok(())
}
