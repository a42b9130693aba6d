use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Domain events emitted after successful writes.
///
/// Emission is an explicit call in the service layer after the transaction
/// commits; there is no implicit dispatch tied to persistence itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    VendorCreated(String),
    VendorUpdated(String),
    VendorDeleted(String),
    PurchaseOrderCreated(String),
    PurchaseOrderUpdated(String),
    PurchaseOrderDeleted(String),
    PurchaseOrderAcknowledged(String),
    VendorMetricsRecalculated { vendor_code: String },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel for the life of the process, logging each event.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("event processor started");
    while let Some(event) = receiver.recv().await {
        debug!(?event, "domain event");
    }
    info!("event channel closed; processor stopping");
}
