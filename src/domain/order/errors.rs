use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid order status: {0:?}")]
    InvalidStatus(String),

    #[error("No status transition available from {status}")]
    NoTransition { status: OrderStatus },

    #[error("Order items cannot be empty")]
    EmptyItems,

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: f64 },

    #[error("Invalid price {price} for product {product_id}")]
    InvalidPrice { product_id: String, price: f64 },

    #[error("Order {0} has already been placed")]
    AlreadyPlaced(String),

    #[error("Event recorded from {recorded} but order is {current}")]
    StaleEvent { recorded: OrderStatus, current: OrderStatus },

    #[error("Aggregate not initialized")]
    NotInitialized,
}
