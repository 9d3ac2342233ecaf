//! Per-chat pending-action state
//!
//! A menu command arms the next text message from that chat: "block a date"
//! means the following message is read as a date to block. The pending
//! action is consumed by that next message and reset, whatever it contained.
//! There is no expiry; an armed action stays armed until the chat's next
//! text message, however much later it arrives.

use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::RwLock;

/// What the next text message from a chat will be interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingAction {
    #[default]
    Idle,
    AwaitingBlockDate,
    AwaitingUnblockDate,
}

/// In-memory store of pending actions, keyed by chat.
#[derive(Debug, Default, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<ChatId, PendingAction>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Current pending action for a chat; `Idle` if none was ever set.
    pub async fn get(&self, chat: ChatId) -> PendingAction {
        let sessions = self.sessions.read().await;
        sessions.get(&chat).copied().unwrap_or_default()
    }

    /// Arm a pending action for a chat.
    pub async fn set(&self, chat: ChatId, action: PendingAction) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(chat, action);
    }

    /// Reset a chat back to `Idle`.
    pub async fn reset(&self, chat: ChatId) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&chat);
    }
}
