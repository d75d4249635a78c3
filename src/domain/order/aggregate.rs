use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::Aggregate;
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::*;
use super::value_objects::{Actor, OrderContact, OrderItem, OrderStatus, OrderTotals, StatusHistoryEntry};
use super::workflow;

pub const PLACED_NOTE: &str = "Pedido recibido";
pub const DEFAULT_CANCEL_NOTE: &str = "Cancelado por el administrador";
pub const DEFAULT_CUSTOMER_NAME: &str = "Cliente";

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================
//
// Status only changes through the workflow engine's transition policy. Each
// change is recorded in the status history with actor and note.
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAggregate {
    // Identity
    pub id: String,
    pub version: i64,

    // Current State (derived from events)
    pub user_id: String,
    pub user_display_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total: f64,
    pub contact: Option<OrderContact>,

    // Audit Trail
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    history: Vec<StatusHistoryEntry>,
}

impl OrderAggregate {
    /// Validate a new order and emit the event that creates it
    pub fn place(command: &OrderCommand) -> Result<Vec<OrderEvent>, OrderError> {
        match command {
            OrderCommand::PlaceOrder { order_id, user_id, user_display_name, items, contact } => {
                validate_items(items)?;

                let total = workflow::totals(items).total;
                tracing::debug!(order_id = %order_id, user_id = %user_id, total, "Placing order");

                Ok(vec![OrderEvent::Placed(OrderPlaced {
                    order_id: order_id.clone(),
                    user_id: user_id.clone(),
                    user_display_name: user_display_name.clone(),
                    items: items.clone(),
                    total,
                    contact: contact.clone(),
                    placed_at: Utc::now(),
                })])
            }
            _ => Err(OrderError::NotInitialized),
        }
    }

    /// Status changes, newest first
    pub fn status_history(&self) -> impl Iterator<Item = &StatusHistoryEntry> {
        self.history.iter().rev()
    }

    pub fn totals(&self) -> OrderTotals {
        workflow::totals(&self.items)
    }

    /// Events carry the status they were decided against; replaying one on
    /// any other status means the history is out of order or duplicated.
    fn ensure_from(&self, recorded: OrderStatus) -> Result<(), OrderError> {
        if recorded != self.status {
            return Err(OrderError::StaleEvent { recorded, current: self.status });
        }
        Ok(())
    }

    fn record(&mut self, status: OrderStatus, from_status: Option<OrderStatus>, actor: Actor, note: String, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at;
        self.history.push(StatusHistoryEntry {
            status,
            from_status,
            actor,
            note,
            timestamp: at,
        });
    }
}

fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyItems);
    }

    for item in items {
        if !item.quantity.is_finite() || item.quantity <= 0.0 {
            return Err(OrderError::InvalidQuantity {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            });
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(OrderError::InvalidPrice {
                product_id: item.product_id.clone(),
                price: item.price,
            });
        }
    }

    Ok(())
}

fn note_or(note: &Option<String>, default: impl FnOnce() -> String) -> String {
    note.as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(default)
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for OrderAggregate {
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            OrderEvent::Placed(e) => {
                let customer = Actor::new(
                    Some(e.user_id.clone()),
                    Some(e.user_display_name.clone().unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string())),
                );

                let mut aggregate = Self {
                    id: e.order_id.clone(),
                    version: 0,
                    user_id: e.user_id.clone(),
                    user_display_name: e.user_display_name.clone(),
                    items: e.items.clone(),
                    status: OrderStatus::Pending,
                    total: e.total,
                    contact: e.contact.clone(),
                    created_at: e.placed_at,
                    updated_at: e.placed_at,
                    history: Vec::new(),
                };
                aggregate.record(OrderStatus::Pending, None, customer, PLACED_NOTE.to_string(), e.placed_at);
                Ok(aggregate)
            }
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            OrderEvent::Placed(e) => Err(OrderError::AlreadyPlaced(e.order_id.clone())),
            OrderEvent::StatusAdvanced(e) => {
                self.ensure_from(e.from)?;
                self.record(e.to, Some(e.from), e.actor.clone(), e.note.clone(), e.at);
                Ok(())
            }
            OrderEvent::Cancelled(e) => {
                self.ensure_from(e.from)?;
                self.record(OrderStatus::Cancelled, Some(e.from), e.actor.clone(), e.note.clone(), e.at);
                Ok(())
            }
        }
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::PlaceOrder { .. } => Err(OrderError::AlreadyPlaced(self.id.clone())),

            OrderCommand::AdvanceStatus { actor, note } => {
                let transition = workflow::advance(self.status)
                    .ok_or(OrderError::NoTransition { status: self.status })?;

                Ok(vec![OrderEvent::StatusAdvanced(OrderStatusAdvanced {
                    from: transition.from,
                    to: transition.to,
                    actor: actor.clone(),
                    note: note_or(note, || format!("Cambio de estado a {}", workflow::label(transition.to))),
                    at: Utc::now(),
                })])
            }

            OrderCommand::CancelOrder { actor, note } => {
                let transition = workflow::cancel(self.status)
                    .ok_or(OrderError::NoTransition { status: self.status })?;

                Ok(vec![OrderEvent::Cancelled(OrderCancelled {
                    from: transition.from,
                    actor: actor.clone(),
                    note: note_or(note, || DEFAULT_CANCEL_NOTE.to_string()),
                    at: Utc::now(),
                })])
            }
        }
    }

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
