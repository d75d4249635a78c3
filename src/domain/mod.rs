// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// - order: status workflow, order aggregate and its history
// - cart: shopping cart as a plain value, checkout into a new order
//
// Nothing here performs I/O; persistence and auth belong to the callers.
//
// ============================================================================

pub mod order;
pub mod cart;
