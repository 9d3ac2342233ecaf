//! Telegram bot implementation

use std::sync::Arc;

use teloxide::{dispatching::UpdateFilterExt, prelude::*, utils::command::BotCommands};
use tracing::info;

use crate::client::ApiClient;
use crate::error::Result;
use crate::handlers::{BotState, handle_message, handle_start};
use crate::rate_limit::RateLimiter;
use crate::session::SessionStore;

/// Telegram bot commands
#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "Booking calendar admin commands"
)]
enum Command {
    #[command(description = "Show the admin keyboard")]
    Start,
    #[command(description = "Show this help message")]
    Help,
}

/// Telegram bot wrapper
pub struct CalendarBot {
    bot: Bot,
    state: Arc<BotState>,
}

impl CalendarBot {
    /// Create a new bot talking to the given API
    pub fn new(token: &str, api: ApiClient) -> Self {
        let bot = Bot::new(token);
        let state = Arc::new(BotState {
            api,
            sessions: SessionStore::new(),
            limiter: RateLimiter::new(),
        });
        Self { bot, state }
    }

    /// Start long-polling for updates
    pub async fn start(self) -> Result<()> {
        info!("Starting Telegram bot...");

        let handler = Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(|bot: Bot, msg: Message, cmd: Command| async move {
                        match cmd {
                            Command::Start => handle_start(bot, msg).await,
                            Command::Help => handle_help(bot, msg).await,
                        }
                    }),
            )
            .branch(dptree::endpoint(
                |bot: Bot, msg: Message, state: Arc<BotState>| async move {
                    handle_message(bot, msg, state).await
                },
            ));

        Dispatcher::builder(self.bot, handler)
            .dependencies(dptree::deps![self.state])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_text() {
        assert!(matches!(
            Command::parse("/start", "bookcal_bot").unwrap(),
            Command::Start
        ));
        assert!(matches!(
            Command::parse("/help", "bookcal_bot").unwrap(),
            Command::Help
        ));
        assert!(Command::parse("/unknown", "bookcal_bot").is_err());
    }
}
