use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// One user-visible line of session progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub message: String,

    /// Drives presentation styling; `false` marks a failure or a skip.
    pub success: bool,

    pub timestamp: DateTime<Utc>,
}

/// Sends every message to both `tracing` and a broadcast channel.
///
/// The tracing output is the persistent log. The channel feeds whatever
/// presentation layer subscribed, and both receive the same text. Sending
/// with no subscriber is not an error.
#[derive(Debug, Clone)]
pub struct EventLog {
    tx: broadcast::Sender<SessionEvent>,
}

impl EventLog {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(message.into(), true);
    }

    pub fn failure(&self, message: impl Into<String>) {
        self.emit(message.into(), false);
    }

    fn emit(&self, message: String, success: bool) {
        if success {
            tracing::info!("{}", message);
        } else {
            tracing::warn!("{}", message);
        }

        let _ = self.tx.send(SessionEvent {
            message,
            success,
            timestamp: Utc::now(),
        });
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
