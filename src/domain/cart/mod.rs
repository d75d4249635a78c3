// ============================================================================
// Cart Domain
// ============================================================================
//
// The storefront cart as an explicit value passed into and returned from
// pure functions, plus checkout into an order command.
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod cart;

pub use value_objects::*;
pub use errors::*;
pub use cart::*;
