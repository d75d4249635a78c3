use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::DomainEvent;
use super::value_objects::{Actor, OrderContact, OrderItem, OrderStatus};

// ============================================================================
// Order Events - Domain Events for Order Aggregate
// ============================================================================

/// Order Event - Union type for all order events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    StatusAdvanced(OrderStatusAdvanced),
    Cancelled(OrderCancelled),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => "OrderPlaced",
            OrderEvent::StatusAdvanced(_) => "OrderStatusAdvanced",
            OrderEvent::Cancelled(_) => "OrderCancelled",
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Order Placed - checkout submitted, order starts out pending
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    pub order_id: String,
    pub user_id: String,
    pub user_display_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub contact: Option<OrderContact>,
    pub placed_at: DateTime<Utc>,
}

/// Order Status Advanced - one step along the forward flow
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusAdvanced {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub actor: Actor,
    pub note: String,
    pub at: DateTime<Utc>,
}

/// Order Cancelled - lifecycle ended before delivery
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancelled {
    pub from: OrderStatus,
    pub actor: Actor,
    pub note: String,
    pub at: DateTime<Utc>,
}
