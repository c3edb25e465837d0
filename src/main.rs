mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod util;

use std::sync::Arc;

use crate::{
    config::Config,
    data::{PriceAlertRepository, SimulatedTokenRepository, TokenHistoryRepository},
    error::AppError,
    scheduler::memecoin,
    service::{
        event_bus::EventBus,
        memecoin::{cleanup::CrashCleanup, MemecoinEngine},
        notification::DiscordNotifier,
    },
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let discord_http = startup::setup_discord_http(&config);
    let event_bus = EventBus::new(config.event_bus_capacity);
    let feed_logger = event_bus.spawn_feed_logger();
    tracing::info!(
        "Market event feed attached ({} subscriber(s))",
        event_bus.receiver_count()
    );

    let tokens = Arc::new(SimulatedTokenRepository::new(db.clone()));
    let alerts = Arc::new(PriceAlertRepository::new(db.clone()));
    let history = Arc::new(TokenHistoryRepository::new(db.clone()));
    let notifier = Arc::new(DiscordNotifier::new(
        discord_http,
        event_bus,
        config.crash_channel_id,
    ));

    let engine = Arc::new(MemecoinEngine::new(
        tokens.clone(),
        alerts.clone(),
        history.clone(),
        notifier,
        config.engine.clone(),
    ));
    let cleanup = Arc::new(CrashCleanup::new(
        tokens,
        alerts,
        history,
        config.cleanup.grace_period,
    ));

    tracing::info!("Starting memecoin engine");

    let mut scheduler = memecoin::start_scheduler(engine, cleanup, &config.cleanup).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down memecoin engine");
    scheduler.shutdown().await?;
    feed_logger.abort();

    Ok(())
}
