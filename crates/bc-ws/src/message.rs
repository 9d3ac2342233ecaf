//! WebSocket message types
//!
//! The push channel is one-way: viewers receive full snapshots and send
//! nothing the server interprets (pings are handled by the socket layer).

use serde::{Deserialize, Serialize};

/// Message from server to viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Full ordered list of blocked dates. Sent to a single new viewer on
    /// connect and broadcast to everyone on every mutation.
    UpdateDates { dates: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_the_update_dates_tag() {
        let msg = ServerMessage::UpdateDates {
            dates: vec!["15-03-2025".to_string()],
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"updateDates"#));
        assert!(json.contains(r#""dates":["15-03-2025"]"#));
    }

    #[test]
    fn empty_snapshot_round_trips() {
        let json = r#"{"type":"updateDates","dates":[]}"#;
        let msg: ServerMessage = serde_json::from_str(json).unwrap();
        let ServerMessage::UpdateDates { dates } = msg;
        assert!(dates.is_empty());
    }
}
