use uuid::Uuid;

use crate::event_sourcing::{Aggregate, EventEnvelope};

use super::aggregate::OrderAggregate;
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::OrderEvent;

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Command → Aggregate → Events → Envelopes
//
// The envelopes are handed back to the caller, which owns persistence and
// writes them (or the resulting single-field status update) to the store.
// Every envelope of one command shares a causation id and carries the
// command name in its metadata.
//
// ============================================================================

/// Result of a successfully handled command
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub aggregate: OrderAggregate,
    pub events: Vec<EventEnvelope<OrderEvent>>,
}

/// Handle `command` against the current state of an order (`None` when the
/// order does not exist yet).
pub fn execute(
    current: Option<OrderAggregate>,
    command: OrderCommand,
    correlation_id: Uuid,
) -> Result<CommandOutcome, OrderError> {
    let (mut aggregate, domain_events) = match current {
        Some(aggregate) => {
            let events = aggregate.handle_command(&command)?;
            (Some(aggregate), events)
        }
        None => (None, OrderAggregate::place(&command)?),
    };

    let acting_user = match &command {
        OrderCommand::PlaceOrder { user_id, .. } => Some(user_id.clone()),
        OrderCommand::AdvanceStatus { actor, .. } | OrderCommand::CancelOrder { actor, .. } => {
            actor.actor_id.clone()
        }
    };

    let command_id = Uuid::new_v4();
    let mut seq = aggregate.as_ref().map_or(0, |a| a.version());
    let mut envelopes = Vec::with_capacity(domain_events.len());

    for domain_event in domain_events {
        seq += 1;

        let updated = match aggregate.take() {
            Some(mut existing) => {
                existing.apply_event(&domain_event)?;
                existing
            }
            None => OrderAggregate::apply_first_event(&domain_event)?,
        };

        let mut envelope = EventEnvelope::new(updated.id.clone(), seq, domain_event, correlation_id)
            .with_causation(command_id)
            .with_metadata("command", command.name());
        aggregate = Some(updated);
        if let Some(user_id) = &acting_user {
            envelope = envelope.with_user(user_id.clone());
        }
        envelopes.push(envelope);
    }

    let mut aggregate = aggregate.ok_or(OrderError::NotInitialized)?;
    aggregate.set_version(seq);

    tracing::debug!(
        order_id = %aggregate.id,
        status = %aggregate.status,
        version = seq,
        events = envelopes.len(),
        "Order command handled"
    );

    Ok(CommandOutcome {
        aggregate,
        events: envelopes,
    })
}

// ============================================================================
// Unit Tests
// ============================================================================
