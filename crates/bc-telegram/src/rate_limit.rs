//! Per-chat rate limiting
//!
//! Caps how many calendar actions a chat can trigger inside a rolling
//! window. Rejected actions get a user-visible notice and no backend call.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use teloxide::types::ChatId;
use tokio::sync::RwLock;
use tracing::warn;

/// Rate limiter configuration
#[derive(Clone)]
pub struct RateLimitConfig {
    /// Maximum actions per window
    pub max_actions: usize,
    /// Rolling window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_actions: 5,
            window: Duration::from_secs(60),
        }
    }
}

/// In-memory rolling-window rate limiter, keyed by chat.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    clients: Arc<RwLock<HashMap<ChatId, Vec<Instant>>>>,
}

impl RateLimiter {
    /// Create a rate limiter with the default configuration
    pub fn new() -> Self {
        Self::with_config(RateLimitConfig::default())
    }

    /// Create a rate limiter with custom configuration
    pub fn with_config(config: RateLimitConfig) -> Self {
        Self {
            config,
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record an action attempt for a chat. Returns false when the chat has
    /// already used up its window; the attempt is then not recorded.
    pub async fn check(&self, chat: ChatId) -> bool {
        let now = Instant::now();
        let mut clients = self.clients.write().await;
        let stamps = clients.entry(chat).or_default();

        stamps.retain(|t| now.duration_since(*t) < self.config.window);

        if stamps.len() >= self.config.max_actions {
            warn!("rate limit exceeded for chat: {chat}");
            return false;
        }

        stamps.push(now);
        true
    }

    /// Drop chats whose whole window has expired (called opportunistically).
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut clients = self.clients.write().await;
        clients.retain(|_, stamps| {
            stamps.retain(|t| now.duration_since(*t) < self.config.window);
            !stamps.is_empty()
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_the_limit_then_rejects() {
        let limiter = RateLimiter::with_config(RateLimitConfig {
            max_actions: 3,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check(ChatId(1)).await);
        assert!(limiter.check(ChatId(1)).await);
        assert!(limiter.check(ChatId(1)).await);
        assert!(!limiter.check(ChatId(1)).await);
    }

    #[tokio::test]
    async fn chats_have_independent_budgets() {
        let limiter = RateLimiter::with_config(RateLimitConfig {
            max_actions: 2,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check(ChatId(1)).await);
        assert!(limiter.check(ChatId(1)).await);
        assert!(!limiter.check(ChatId(1)).await);

        assert!(limiter.check(ChatId(2)).await);
        assert!(limiter.check(ChatId(2)).await);
    }

    #[tokio::test]
    async fn window_slides_rather_than_resetting() {
        let limiter = RateLimiter::with_config(RateLimitConfig {
            max_actions: 2,
            window: Duration::from_millis(50),
        });

        assert!(limiter.check(ChatId(1)).await);
        assert!(limiter.check(ChatId(1)).await);
        assert!(!limiter.check(ChatId(1)).await);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(limiter.check(ChatId(1)).await);
    }

    #[tokio::test]
    async fn cleanup_drops_expired_chats() {
        let limiter = RateLimiter::with_config(RateLimitConfig {
            max_actions: 1,
            window: Duration::from_millis(10),
        });
        limiter.check(ChatId(1)).await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        limiter.cleanup().await;

        let clients = limiter.clients.read().await;
        assert!(clients.is_empty());
    }
}
