// ============================================================================
// Seafood storefront order workflow
// ============================================================================
//
// - domain::order::workflow: status labels, timeline positions, totals and
//   the transition policy, as pure functions
// - domain::order: event-sourced order aggregate with status history
// - domain::cart: cart value and checkout
// - models: order records as stored by the storefront
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod models;

pub use domain::order::workflow;
