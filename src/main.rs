//! Rate calculator bot for Telegram - Main executable
//!
//! Keeps a table of exchange rates against the Moldovan leu and computes the
//! profit of reselling game lots and Telegram items bought with in-game
//! actions paid in foreign currency.
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};
use rate_calculator_bot::{AppConfig, Command, RateStore, Router, ServiceContainer, TelegramRouter};
use std::sync::Arc;
use teloxide::{prelude::*, utils::command::BotCommands};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!(
        "Starting Rate Calculator Telegram Bot v{}",
        rate_calculator_bot::VERSION
    );

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Create Telegram bot instance
    let bot = Bot::new(config.telegram_bot_token.clone());

    info!("Loading exchange rates...");
    let rate_store = Arc::new(RateStore::open(config.rates_file.clone()).await);

    let services = Arc::new(ServiceContainer::new(&config, rate_store));

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    // Get the handler from the router
    let router = TelegramRouter::new(services);
    let handler = router.setup_handlers();

    // Build dispatcher with control-C handling
    let mut dispatcher = Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build();

    info!("Bot is running! Press Ctrl+C to stop.");
    dispatcher.dispatch().await;

    Ok(())
}
