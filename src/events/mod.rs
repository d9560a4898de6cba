use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

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

// The events the ledger engine can emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Catalog events
    MaterialCreated(Uuid),
    MaterialUpdated(Uuid),
    MaterialDeleted(Uuid),

    // Ledger events
    StockReceived {
        town_id: Uuid,
        line_count: usize,
    },
    StockAllocated {
        town_id: Uuid,
        user_id: Uuid,
        line_count: usize,
    },
    StockSettled {
        town_id: Uuid,
        user_id: Uuid,
        returned: i32,
        lost: i32,
        damaged: i32,
    },

    // Order events
    OrderCreated(Uuid),
}

/// Drains the event channel, logging each event. Runs for the lifetime of
/// the process; downstream consumers (notifications, reporting) subscribe
/// here when they exist.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    while let Some(event) = rx.recv().await {
        match event {
            Event::MaterialCreated(id) => info!("Material created: {}", id),
            Event::MaterialUpdated(id) => info!("Material updated: {}", id),
            Event::MaterialDeleted(id) => info!("Material deleted: {}", id),
            Event::StockReceived {
                town_id,
                line_count,
            } => info!(
                "Town {} received stock across {} material lines",
                town_id, line_count
            ),
            Event::StockAllocated {
                town_id,
                user_id,
                line_count,
            } => info!(
                "Allocated {} material lines from town {} to user {}",
                line_count, town_id, user_id
            ),
            Event::StockSettled {
                town_id,
                user_id,
                returned,
                lost,
                damaged,
            } => {
                info!(
                    "User {} settled with town {}: returned={}, lost={}, damaged={}",
                    user_id, town_id, returned, lost, damaged
                );
                if lost > 0 || damaged > 0 {
                    warn!(
                        "Write-off recorded for user {}: {} lost, {} damaged",
                        user_id, lost, damaged
                    );
                }
            }
            Event::OrderCreated(id) => info!("Sales order created: {}", id),
        }
    }
}
