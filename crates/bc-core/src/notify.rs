//! Registry-change notification channel
//!
//! Fan-out of registry snapshots to connected observers, built on
//! `tokio::sync::broadcast`. Delivery is fire-and-forget: publishing never
//! blocks the mutation path, and a publish with no connected observers is
//! not an error. Observers always receive the full ordered list, never a
//! diff, so a slow observer that misses an intermediate snapshot still
//! converges on the latest state.

use tokio::sync::broadcast;
use tracing::debug;

/// The unit of broadcast: the full ordered list of blocked dates in wire form.
pub type Snapshot = Vec<String>;

/// Capacity of the broadcast channel. Observers that fall further behind
/// than this see a `Lagged` error and pick up again at the newest snapshot.
const CHANNEL_CAPACITY: usize = 256;

/// Publish/subscribe handle for registry-change events.
#[derive(Clone)]
pub struct NotificationChannel {
    tx: broadcast::Sender<Snapshot>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe a new observer. Dropping the receiver unsubscribes it.
    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Broadcast a snapshot to every connected observer.
    pub fn publish(&self, snapshot: Snapshot) {
        // SendError here only means there are no observers right now.
        match self.tx.send(snapshot) {
            Ok(n) => debug!("published snapshot to {n} observers"),
            Err(_) => debug!("published snapshot with no observers connected"),
        }
    }

    /// Number of currently connected observers.
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_snapshot() {
        let channel = NotificationChannel::new();
        let mut rx = channel.subscribe();

        channel.publish(vec!["15-03-2025".to_string()]);

        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot, vec!["15-03-2025".to_string()]);
    }

    #[tokio::test]
    async fn publish_without_observers_is_not_an_error() {
        let channel = NotificationChannel::new();
        channel.publish(vec![]);
        assert_eq!(channel.observer_count(), 0);
    }

    #[tokio::test]
    async fn every_observer_sees_the_broadcast() {
        let channel = NotificationChannel::new();
        let mut rx1 = channel.subscribe();
        let mut rx2 = channel.subscribe();
        assert_eq!(channel.observer_count(), 2);

        channel.publish(vec!["01-01-2025".to_string()]);

        assert_eq!(rx1.recv().await.unwrap(), vec!["01-01-2025".to_string()]);
        assert_eq!(rx2.recv().await.unwrap(), vec!["01-01-2025".to_string()]);
    }

    #[tokio::test]
    async fn dropping_the_receiver_unsubscribes() {
        let channel = NotificationChannel::new();
        let rx = channel.subscribe();
        drop(rx);
        assert_eq!(channel.observer_count(), 0);
    }
}
