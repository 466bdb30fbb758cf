//! Notification delivery side channel.
//!
//! Fan-out publishes a lightweight receiver event onto a bounded queue
//! and never waits for delivery; a full or closed queue drops the event
//! with a warning. The delivery worker consumes the other end.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

pub const NOTIFICATION_TOPIC: &str = "notification";

/// Event pushed to the delivery channel when a notification is created
/// or re-surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEvent {
    pub topic: String,
    pub receiver_id: ObjectId,
}

/// Fire-and-forget publish seam; no acknowledgement is awaited.
pub trait EventChannel: Send + Sync {
    fn publish(&self, topic: &str, receiver_id: ObjectId);
}

/// Bounded in-process queue implementation.
#[derive(Clone)]
pub struct BoundedEventChannel {
    tx: mpsc::Sender<DeliveryEvent>,
}

impl BoundedEventChannel {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<DeliveryEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl EventChannel for BoundedEventChannel {
    fn publish(&self, topic: &str, receiver_id: ObjectId) {
        let event = DeliveryEvent {
            topic: topic.to_string(),
            receiver_id,
        };
        if let Err(err) = self.tx.try_send(event) {
            // Best effort only; the primary mutation already succeeded.
            warn!(topic, %receiver_id, "delivery event dropped: {err}");
        }
    }
}
