//! User-facing notifications raised below the UI layer.
//!
//! The HTTP client publishes here instead of drawing anything; views
//! subscribe and decide how to present each notification.

use tokio::sync::broadcast;

const NOTIFICATION_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The server refused content outside the student's enrolled class.
    /// Carries the server's message verbatim.
    ClassAccessDenied { message: String },
}

impl Notification {
    /// Text shown in the blocking alert
    pub fn alert_text(&self) -> String {
        match self {
            Notification::ClassAccessDenied { message } => format!("Access Restricted: {}", message),
        }
    }
}

/// Fan-out hub. Clones publish to the same subscribers.
#[derive(Debug, Clone)]
pub struct NotificationHub {
    tx: broadcast::Sender<Notification>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self { tx }
    }

    /// Publish to every current subscriber. Returns how many received it.
    pub fn publish(&self, notification: Notification) -> usize {
        match self.tx.send(notification) {
            Ok(count) => count,
            Err(broadcast::error::SendError(dropped)) => {
                tracing::debug!(target: "revisewise::notify", ?dropped, "no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}
