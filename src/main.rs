#![allow(clippy::result_large_err)]

use attendance_desk::{
    bot::{self, BotData},
    config,
    errors::{Error, Result},
    service::HttpAttendanceService,
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Resolve the attendance service endpoint
    let service_config = config::service::load_service_config()
        .inspect_err(|e| error!("Critical error loading service configuration: {}", e))?;
    info!(
        "Using attendance service at {}",
        service_config.script_url.host_str().unwrap_or("<no host>")
    );

    let service = HttpAttendanceService::new(&service_config)
        .inspect_err(|e| error!("Failed to build HTTP client: {}", e))?;

    // 4. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(service)).await?;

    Ok(())
}
