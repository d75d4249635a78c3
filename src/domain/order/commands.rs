use super::value_objects::{Actor, OrderContact, OrderItem};

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    PlaceOrder {
        order_id: String,
        user_id: String,
        user_display_name: Option<String>,
        items: Vec<OrderItem>,
        contact: Option<OrderContact>,
    },
    /// Move to the next forward-flow status
    AdvanceStatus {
        actor: Actor,
        note: Option<String>,
    },
    CancelOrder {
        actor: Actor,
        note: Option<String>,
    },
}

impl OrderCommand {
    pub fn name(&self) -> &'static str {
        match self {
            OrderCommand::PlaceOrder { .. } => "PlaceOrder",
            OrderCommand::AdvanceStatus { .. } => "AdvanceStatus",
            OrderCommand::CancelOrder { .. } => "CancelOrder",
        }
    }
}
