//! Delivery worker draining the notification event channel.
//!
//! The worker holds the receiving half of the bounded channel and hands
//! each event to a [`DeliverySink`]. Sink failures are logged and the
//! loop keeps going; the worker exits only when every sender is gone.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::error::ServiceResult;
use crate::services::events::DeliveryEvent;

/// Terminal hop of the notification pipeline. Real deployments plug in
/// a push or websocket bridge here; the default just logs.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    async fn deliver(&self, event: &DeliveryEvent) -> ServiceResult<()>;
}

/// Sink that writes each event to the structured log.
#[derive(Debug, Default)]
pub struct LogDelivery;

#[async_trait]
impl DeliverySink for LogDelivery {
    async fn deliver(&self, event: &DeliveryEvent) -> ServiceResult<()> {
        info!(
            topic = %event.topic,
            receiver_id = %event.receiver_id,
            "notification delivery"
        );
        Ok(())
    }
}

/// Drain the channel until all senders are dropped.
pub async fn run(mut rx: mpsc::Receiver<DeliveryEvent>, sink: Arc<dyn DeliverySink>) {
    info!("delivery worker started");
    while let Some(event) = rx.recv().await {
        debug!(topic = %event.topic, receiver_id = %event.receiver_id, "delivery event received");
        if let Err(err) = sink.deliver(&event).await {
            error!(topic = %event.topic, receiver_id = %event.receiver_id, "delivery failed: {err}");
        }
    }
    info!("delivery worker stopped");
}
