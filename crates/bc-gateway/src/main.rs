//! bc-gateway: Booking Calendar Gateway Main Binary
//!
//! Starts the HTTP API + WebSocket server and, when a bot token is
//! configured, the Telegram admin bot alongside it.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use bc_api::AppState;
use bc_core::{BlockedDateStore, Config, DateRegistry, NotificationChannel};
use bc_telegram::{ApiClient, CalendarBot};
use bc_ws::WsState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("config error: {e}"))?;

    tracing::info!("Starting bc-gateway...");

    // The registry must be fully loaded from the store before anything is
    // allowed to read or mutate it.
    let store = BlockedDateStore::new(&config.db_path)?;
    let registry = Arc::new(DateRegistry::new(store));
    let loaded = registry.reload().await?;
    tracing::info!("loaded {loaded} blocked dates from {}", config.db_path);

    let notifier = NotificationChannel::new();

    let app_state = AppState {
        registry: registry.clone(),
        notifier: notifier.clone(),
        api_secret: config.api_secret.clone(),
    };
    let ws_router = bc_ws::router(WsState {
        registry,
        notifier,
    });

    let server = bc_api::start_server(
        config.port,
        config.allowed_origins.clone(),
        app_state,
        ws_router,
    );

    match config.telegram_token.as_deref() {
        Some(token) => {
            let api = ApiClient::new(config.api_url.clone(), config.api_secret.clone());
            let bot = CalendarBot::new(token, api);

            tokio::select! {
                result = server => result?,
                result = bot.start() => result?,
            }
        }
        None => {
            tracing::info!("TELEGRAM_BOT_TOKEN not set, running without the bot");
            server.await?;
        }
    }

    Ok(())
}
