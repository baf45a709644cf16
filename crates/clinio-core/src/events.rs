//! User-facing outcome events.
//!
//! The HTTP layer classifies failures into [`ClientEvent`]s and publishes
//! them through an injected [`EventSink`]; how an event is rendered (toast,
//! modal, banner) is the presentation layer's decision.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A classified, user-facing outcome of an API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// The tenant addressed by the current hostname does not exist or is
    /// inactive; the client will navigate to `redirect_to` shortly.
    TenantNotFound {
        tenant_id: String,
        display_name: String,
        redirect_to: String,
    },
    /// Credentials were rejected and have been cleared.
    SessionExpired { redirect_to: Option<String> },
    /// The action was understood but is not permitted.
    ActionForbidden,
    /// The server failed; nothing was retried.
    ServerFault,
}

impl ClientEvent {
    /// Suggested message for direct display.
    pub fn user_message(&self) -> String {
        match self {
            Self::TenantNotFound { display_name, .. } => format!(
                "The clinic \"{}\" does not exist or is not active.",
                display_name
            ),
            Self::SessionExpired { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            Self::ActionForbidden => {
                "You do not have permission to perform this action.".to_string()
            }
            Self::ServerFault => {
                "A server error occurred. Please try again later.".to_string()
            }
        }
    }
}

/// Receives classified events from the HTTP layer.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: ClientEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: ClientEvent) {}
}

/// Collects events in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ClientEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ClientEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: ClientEvent) {
        self.events.lock().push(event);
    }
}

/// Forwards events into an unbounded channel for a rendering loop.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ClientEvent>,
}

impl ChannelSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ClientEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn publish(&self, event: ClientEvent) {
        // A closed receiver means the UI is gone; dropping the event is fine.
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_in_order() {
        let sink = MemorySink::new();
        sink.publish(ClientEvent::ActionForbidden);
        sink.publish(ClientEvent::ServerFault);

        assert_eq!(
            sink.events(),
            vec![ClientEvent::ActionForbidden, ClientEvent::ServerFault]
        );
    }

    #[test]
    fn test_tenant_not_found_message_names_the_clinic() {
        let event = ClientEvent::TenantNotFound {
            tenant_id: "northside".to_string(),
            display_name: "Clinic Northside".to_string(),
            redirect_to: "http://localhost:5173".to_string(),
        };

        assert!(event.user_message().contains("Clinic Northside"));
    }

    #[tokio::test]
    async fn test_channel_sink_delivers() {
        let (sink, mut rx) = ChannelSink::channel();
        sink.publish(ClientEvent::ServerFault);

        assert_eq!(rx.recv().await, Some(ClientEvent::ServerFault));
    }
}
