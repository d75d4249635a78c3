// ============================================================================
// Order Domain - Business Logic for Orders
// ============================================================================
//
// - Value objects (OrderStatus, OrderItem, Audience, ...)
// - Workflow engine (labels, step positions, totals, transition policy)
// - Events, commands and errors
// - Aggregate (OrderAggregate with status history)
// - Command handler
//
// ============================================================================

pub mod value_objects;
pub mod workflow;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use workflow::{StepState, TimelineEntry, Transition, FORWARD_FLOW};
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;
