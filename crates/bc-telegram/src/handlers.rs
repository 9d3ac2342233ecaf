//! Bot message handling
//!
//! The operator drives everything from a reply keyboard: a view button and
//! two arm-then-input flows for blocking and unblocking. Dates are checked
//! with the shared validator before any backend call, so the bot and the
//! server can never disagree on what a well-formed date is.

use std::sync::Arc;

use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, KeyboardButton, KeyboardMarkup, ParseMode};
use tracing::{info, warn};

use bc_core::NormalizedDate;

use crate::client::{ApiClient, ApiOutcome};
use crate::error::Result;
use crate::rate_limit::RateLimiter;
use crate::session::{PendingAction, SessionStore};

/// Bot state shared across handlers
pub struct BotState {
    pub api: ApiClient,
    pub sessions: SessionStore,
    pub limiter: RateLimiter,
}

// Keyboard button labels; incoming text is matched against these verbatim.
pub const VIEW_CALENDAR: &str = "📅 View calendar";
pub const BLOCK_DATE: &str = "🔒 Block a date";
pub const UNBLOCK_DATE: &str = "🔓 Unblock a date";

const WELCOME: &str = "👋 Welcome! Manage the booking calendar with the buttons below.";
const DATE_PROMPT: &str = "📝 Enter the date as DD-MM-YYYY\n\nExample: 15-03-2025";
const FORMAT_HINT: &str = "❌ Invalid format. Use DD-MM-YYYY, e.g. 15-03-2025";
const IDLE_HINT: &str = "Use the keyboard below, or /start to bring it back.";
const THROTTLED: &str = "⏳ Too many requests. Wait a minute and try again.";
const NETWORK_ERROR: &str = "❌ Could not reach the calendar service. Try again later.";

/// The reply keyboard shown on /start
pub fn admin_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(VIEW_CALENDAR)],
        vec![KeyboardButton::new(BLOCK_DATE)],
        vec![KeyboardButton::new(UNBLOCK_DATE)],
    ])
    .resize_keyboard()
}

/// Handle /start
pub async fn handle_start(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, WELCOME)
        .reply_markup(admin_keyboard())
        .await?;
    Ok(())
}

/// Handle any non-command message
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    let text = text.trim();

    let pending = state.sessions.get(chat_id).await;
    let is_action = matches!(text, VIEW_CALENDAR | BLOCK_DATE | UNBLOCK_DATE)
        || pending != PendingAction::Idle;

    if is_action && !state.limiter.check(chat_id).await {
        bot.send_message(chat_id, THROTTLED).await?;
        return Ok(());
    }

    match text {
        VIEW_CALENDAR => handle_view(bot, chat_id, &state).await,
        BLOCK_DATE => {
            state
                .sessions
                .set(chat_id, PendingAction::AwaitingBlockDate)
                .await;
            bot.send_message(chat_id, DATE_PROMPT).await?;
            Ok(())
        }
        UNBLOCK_DATE => {
            state
                .sessions
                .set(chat_id, PendingAction::AwaitingUnblockDate)
                .await;
            bot.send_message(chat_id, DATE_PROMPT).await?;
            Ok(())
        }
        _ => match pending {
            PendingAction::AwaitingBlockDate => {
                handle_date_input(bot, chat_id, &state, text, Mutation::Block).await
            }
            PendingAction::AwaitingUnblockDate => {
                handle_date_input(bot, chat_id, &state, text, Mutation::Unblock).await
            }
            PendingAction::Idle => {
                bot.send_message(chat_id, IDLE_HINT).await?;
                Ok(())
            }
        },
    }
}

async fn handle_view(bot: Bot, chat_id: ChatId, state: &BotState) -> Result<()> {
    match state.api.booked_dates().await {
        Ok(dates) => {
            bot.send_message(chat_id, render_calendar(&dates))
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Err(e) => {
            warn!("calendar fetch failed: {e}");
            bot.send_message(chat_id, NETWORK_ERROR).await?;
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Mutation {
    Block,
    Unblock,
}

async fn handle_date_input(
    bot: Bot,
    chat_id: ChatId,
    state: &BotState,
    text: &str,
    mutation: Mutation,
) -> Result<()> {
    // The pending action is consumed by this message no matter what it held.
    state.sessions.reset(chat_id).await;

    let Ok(date) = NormalizedDate::parse(text) else {
        bot.send_message(chat_id, FORMAT_HINT).await?;
        return Ok(());
    };

    let outcome = match mutation {
        Mutation::Block => state.api.block_date(&date).await,
        Mutation::Unblock => state.api.unblock_date(&date).await,
    };

    match outcome {
        Ok(ApiOutcome::Accepted { .. }) => {
            let verb = match mutation {
                Mutation::Block => "blocked",
                Mutation::Unblock => "unblocked",
            };
            info!("chat {chat_id} {verb} date {date}");
            bot.send_message(chat_id, format!("✅ Date <b>{date}</b> {verb}!"))
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Ok(ApiOutcome::Rejected { message }) => {
            bot.send_message(chat_id, format!("❌ {message}")).await?;
        }
        Err(e) => {
            warn!("backend call failed: {e}");
            bot.send_message(chat_id, NETWORK_ERROR).await?;
        }
    }
    Ok(())
}

/// Numbered list of blocked dates with a total, or an all-clear line.
fn render_calendar(dates: &[String]) -> String {
    if dates.is_empty() {
        return "✅ No blocked dates".to_string();
    }

    let mut message = String::from("📅 <b>Blocked dates:</b>\n\n");
    for (index, date) in dates.iter().enumerate() {
        message.push_str(&format!("{}. {date}\n", index + 1));
    }
    message.push_str(&format!("\n<b>Total:</b> {}", dates.len()));
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_calendar_renders_all_clear() {
        assert_eq!(render_calendar(&[]), "✅ No blocked dates");
    }

    #[test]
    fn calendar_renders_numbered_list_with_total() {
        let rendered = render_calendar(&[
            "20-12-2024".to_string(),
            "05-01-2025".to_string(),
        ]);
        assert!(rendered.contains("1. 20-12-2024"));
        assert!(rendered.contains("2. 05-01-2025"));
        assert!(rendered.contains("<b>Total:</b> 2"));
    }

    #[test]
    fn keyboard_has_all_three_actions() {
        let keyboard = admin_keyboard();
        let labels: Vec<&str> = keyboard
            .keyboard
            .iter()
            .flatten()
            .map(|button| button.text.as_str())
            .collect();
        assert_eq!(labels, vec![VIEW_CALENDAR, BLOCK_DATE, UNBLOCK_DATE]);
    }
}
