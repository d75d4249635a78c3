// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic aggregate/event abstractions. Storing the events is left to the
// persistence layer; domain-specific code is in src/domain/
//
// ============================================================================

mod core;

pub use self::core::*;
