use serde::Serialize;

use super::value_objects::{Audience, OrderItem, OrderStatus, OrderStatusStep, OrderTotals};

// ============================================================================
// Order Workflow Engine
// ============================================================================
//
// Pure functions over an order's status and line items:
// - Status labels and badge styles
// - Position along the forward flow (timeline rendering)
// - Audience-specific step descriptions
// - Order totals
// - Transition policy (advance / cancel)
//
// Every table is an exhaustive match on OrderStatus, so adding a status
// does not compile until each mapping handles it.
//
// ============================================================================

/// The happy-path sequence an order moves through before delivery.
pub const FORWARD_FLOW: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

/// Index reported for statuses off the forward flow (cancelled).
pub const NOT_ON_FLOW: i32 = -1;

// ============================================================================
// Status Metadata
// ============================================================================

pub fn label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pendiente",
        OrderStatus::Confirmed => "Confirmado",
        OrderStatus::Preparing => "Preparando",
        OrderStatus::Shipped => "En transito",
        OrderStatus::Delivered => "Entregado",
        OrderStatus::Cancelled => "Cancelado",
    }
}

pub fn badge_style(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "bg-gray-100 text-gray-700",
        OrderStatus::Confirmed => "bg-purple-100 text-purple-700",
        OrderStatus::Preparing => "bg-yellow-100 text-yellow-700",
        OrderStatus::Shipped => "bg-blue-100 text-blue-700",
        OrderStatus::Delivered => "bg-green-100 text-green-700",
        OrderStatus::Cancelled => "bg-red-100 text-red-700",
    }
}

/// Label for a raw stored status; unknown values get the pending label.
pub fn label_for_raw(raw: &str) -> &'static str {
    label(OrderStatus::parse_lenient(raw))
}

/// Badge style for a raw stored status; unknown values get the pending style.
pub fn badge_style_for_raw(raw: &str) -> &'static str {
    badge_style(OrderStatus::parse_lenient(raw))
}

// ============================================================================
// Progress Steps
// ============================================================================

/// Zero-based position of `status` in [`FORWARD_FLOW`], or [`NOT_ON_FLOW`]
/// for cancelled orders.
pub fn step_index(status: OrderStatus) -> i32 {
    if status == OrderStatus::Cancelled {
        return NOT_ON_FLOW;
    }

    FORWARD_FLOW
        .iter()
        .position(|s| *s == status)
        .map_or(NOT_ON_FLOW, |i| i as i32)
}

/// Where a forward-flow step sits relative to an order's current status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Current,
    Upcoming,
}

/// Steps off the forward flow (cancelled) are never reached, so they always
/// report `Upcoming`.
pub fn step_state(current: OrderStatus, step: OrderStatus) -> StepState {
    let current = step_index(current);
    let step = step_index(step);

    if step == NOT_ON_FLOW {
        StepState::Upcoming
    } else if current > step {
        StepState::Completed
    } else if current == step {
        StepState::Current
    } else {
        StepState::Upcoming
    }
}

pub fn description(status: OrderStatus, audience: Audience) -> &'static str {
    use Audience::*;
    use OrderStatus::*;

    match (status, audience) {
        (Pending, Portal) => "Recibimos tu pedido y estamos verificando los productos.",
        (Pending, Admin) => "Pedido recibido, a la espera de confirmacion.",
        (Confirmed, Portal) => "Confirmamos la disponibilidad de cada item.",
        (Confirmed, Admin) => "Disponibilidad confirmada por el equipo.",
        (Preparing, Portal) => "Estamos preparando tu pedido para el despacho.",
        (Preparing, Admin) => "Seleccionando y acondicionando los productos.",
        (Shipped, Portal) => "Tu pedido esta en camino a tu direccion.",
        (Shipped, Admin) => "Pedido despachado hacia el cliente.",
        (Delivered, Portal) => "Tu pedido fue entregado.",
        (Delivered, Admin) => "Pedido entregado al cliente.",
        (Cancelled, _) => "El pedido fue cancelado.",
    }
}

/// The five forward-flow steps with labels and audience descriptions.
pub fn steps(audience: Audience) -> Vec<OrderStatusStep> {
    FORWARD_FLOW
        .iter()
        .map(|&value| OrderStatusStep {
            value,
            label: label(value),
            description: description(value, audience),
        })
        .collect()
}

/// A step paired with its state for a given order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    #[serde(flatten)]
    pub step: OrderStatusStep,
    pub state: StepState,
}

/// Timeline for an order, or `None` when it was cancelled and callers should
/// show the cancellation banner instead.
pub fn timeline(current: OrderStatus, audience: Audience) -> Option<Vec<TimelineEntry>> {
    if step_index(current) == NOT_ON_FLOW {
        return None;
    }

    Some(
        steps(audience)
            .into_iter()
            .map(|step| TimelineEntry {
                state: step_state(current, step.value),
                step,
            })
            .collect(),
    )
}

// ============================================================================
// Totals
// ============================================================================

pub fn totals(items: &[OrderItem]) -> OrderTotals {
    let subtotal = items.iter().fold(0.0, |sum, item| sum + item.line_total());
    OrderTotals {
        subtotal,
        total: subtotal,
    }
}

/// Sum of quantities across all lines
pub fn item_count(items: &[OrderItem]) -> f64 {
    items.iter().map(|item| item.quantity).sum()
}

// ============================================================================
// Transition Policy
// ============================================================================

/// A status change the policy allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Successor of `status` along the forward flow.
pub fn next_status(status: OrderStatus) -> Option<OrderStatus> {
    match status {
        OrderStatus::Pending => Some(OrderStatus::Confirmed),
        OrderStatus::Confirmed => Some(OrderStatus::Preparing),
        OrderStatus::Preparing => Some(OrderStatus::Shipped),
        OrderStatus::Shipped => Some(OrderStatus::Delivered),
        OrderStatus::Delivered => None,
        OrderStatus::Cancelled => None,
    }
}

/// Delivered orders can't be cancelled, and cancelling twice is not a transition.
pub fn can_cancel(status: OrderStatus) -> bool {
    match status {
        OrderStatus::Pending
        | OrderStatus::Confirmed
        | OrderStatus::Preparing
        | OrderStatus::Shipped => true,
        OrderStatus::Delivered | OrderStatus::Cancelled => false,
    }
}

/// Customers may only withdraw orders nobody has confirmed yet; the admin
/// console follows [`can_cancel`].
pub fn can_cancel_as(status: OrderStatus, audience: Audience) -> bool {
    match audience {
        Audience::Portal => status == OrderStatus::Pending,
        Audience::Admin => can_cancel(status),
    }
}

pub fn is_terminal(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled)
}

pub fn advance(status: OrderStatus) -> Option<Transition> {
    next_status(status).map(|to| Transition { from: status, to })
}

pub fn cancel(status: OrderStatus) -> Option<Transition> {
    can_cancel(status).then_some(Transition {
        from: status,
        to: OrderStatus::Cancelled,
    })
}

/// Every status reachable from `status` in one step.
pub fn allowed_transitions(status: OrderStatus) -> Vec<OrderStatus> {
    advance(status)
        .into_iter()
        .chain(cancel(status))
        .map(|t| t.to)
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<OrderItem> {
        vec![
            OrderItem::new("salmon", "Salmon", 2.0, 1800.0),
            OrderItem::new("merluza", "Merluza", 1.0, 950.5),
        ]
    }

    #[test]
    fn test_totals_computes_subtotal_and_total() {
        let result = totals(&sample_items());
        assert_eq!(result.subtotal, 4550.5);
        assert_eq!(result.total, 4550.5);
    }

    #[test]
    fn test_totals_of_no_items_is_zero() {
        assert_eq!(totals(&[]), OrderTotals { subtotal: 0.0, total: 0.0 });
    }

    #[test]
    fn test_totals_with_fractional_quantity() {
        let items = vec![OrderItem::new("pulpo", "Pulpo", 0.5, 4200.0)];
        assert_eq!(totals(&items).total, 2100.0);
        assert_eq!(item_count(&items), 0.5);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        assert_eq!(item_count(&sample_items()), 3.0);
        assert_eq!(item_count(&[]), 0.0);
    }

    #[test]
    fn test_step_index_follows_forward_flow() {
        for (i, status) in FORWARD_FLOW.iter().enumerate() {
            assert_eq!(step_index(*status), i as i32);
        }
        assert_eq!(step_index(OrderStatus::Cancelled), -1);
    }

    #[test]
    fn test_labels_are_non_empty_and_stable() {
        for status in OrderStatus::ALL {
            assert!(!label(status).is_empty());
            assert_eq!(label(status), label(status));
        }
        assert_eq!(label(OrderStatus::Shipped), "En transito");
    }

    #[test]
    fn test_badge_styles_are_distinct() {
        let mut styles: Vec<_> = OrderStatus::ALL.iter().map(|s| badge_style(*s)).collect();
        styles.sort();
        styles.dedup();
        assert_eq!(styles.len(), 6);

        let cancelled = badge_style(OrderStatus::Cancelled);
        assert!(cancelled.contains("bg-red-100"));
        assert!(cancelled.contains("text-red-700"));
    }

    #[test]
    fn test_raw_status_falls_back_to_pending_metadata() {
        assert_eq!(label_for_raw("lost"), "Pendiente");
        assert_eq!(badge_style_for_raw("lost"), badge_style(OrderStatus::Pending));
        assert_eq!(label_for_raw("shipped"), "En transito");
    }

    #[test]
    fn test_steps_are_consistent_across_audiences() {
        let portal = steps(Audience::Portal);
        let admin = steps(Audience::Admin);

        assert_eq!(portal.len(), 5);
        assert_eq!(admin.len(), 5);

        for (portal_step, admin_step) in portal.iter().zip(&admin) {
            assert_eq!(portal_step.value, admin_step.value);
            assert_eq!(portal_step.label, label(portal_step.value));
            assert_eq!(admin_step.label, label(admin_step.value));
        }

        assert_ne!(portal[0].description, admin[0].description);
        assert!(portal.iter().all(|s| s.value != OrderStatus::Cancelled));
    }

    #[test]
    fn test_steps_order_matches_step_index() {
        let admin_steps = steps(Audience::Admin);
        for status in FORWARD_FLOW {
            let index = step_index(status);
            assert_eq!(step_index(admin_steps[index as usize].value), index);
        }
    }

    #[test]
    fn test_step_state_three_way_comparison() {
        let current = OrderStatus::Preparing;
        assert_eq!(step_state(current, OrderStatus::Pending), StepState::Completed);
        assert_eq!(step_state(current, OrderStatus::Confirmed), StepState::Completed);
        assert_eq!(step_state(current, OrderStatus::Preparing), StepState::Current);
        assert_eq!(step_state(current, OrderStatus::Shipped), StepState::Upcoming);
        assert_eq!(step_state(current, OrderStatus::Delivered), StepState::Upcoming);
    }

    #[test]
    fn test_cancelled_step_is_never_completed() {
        for current in OrderStatus::ALL {
            assert_eq!(step_state(current, OrderStatus::Cancelled), StepState::Upcoming);
        }
        assert_eq!(step_state(OrderStatus::Cancelled, OrderStatus::Pending), StepState::Upcoming);
    }

    #[test]
    fn test_timeline_is_hidden_for_cancelled_orders() {
        assert!(timeline(OrderStatus::Cancelled, Audience::Portal).is_none());

        let entries = timeline(OrderStatus::Delivered, Audience::Portal).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[4].state, StepState::Current);
        assert!(entries[..4].iter().all(|e| e.state == StepState::Completed));
    }

    #[test]
    fn test_next_status_over_all_statuses() {
        assert_eq!(next_status(OrderStatus::Pending), Some(OrderStatus::Confirmed));
        assert_eq!(next_status(OrderStatus::Confirmed), Some(OrderStatus::Preparing));
        assert_eq!(next_status(OrderStatus::Preparing), Some(OrderStatus::Shipped));
        assert_eq!(next_status(OrderStatus::Shipped), Some(OrderStatus::Delivered));
        assert_eq!(next_status(OrderStatus::Delivered), None);
        assert_eq!(next_status(OrderStatus::Cancelled), None);
    }

    #[test]
    fn test_can_cancel_over_all_statuses() {
        assert!(can_cancel(OrderStatus::Pending));
        assert!(can_cancel(OrderStatus::Confirmed));
        assert!(can_cancel(OrderStatus::Preparing));
        assert!(can_cancel(OrderStatus::Shipped));
        assert!(!can_cancel(OrderStatus::Delivered));
        assert!(!can_cancel(OrderStatus::Cancelled));
    }

    #[test]
    fn test_portal_cancels_only_pending_orders() {
        for status in OrderStatus::ALL {
            assert_eq!(can_cancel_as(status, Audience::Portal), status == OrderStatus::Pending);
            assert_eq!(can_cancel_as(status, Audience::Admin), can_cancel(status));
        }
        assert!(!can_cancel_as(OrderStatus::Confirmed, Audience::Portal));
        assert!(can_cancel_as(OrderStatus::Confirmed, Audience::Admin));
    }

    #[test]
    fn test_terminal_statuses_have_no_transitions() {
        for status in OrderStatus::ALL {
            assert_eq!(is_terminal(status), allowed_transitions(status).is_empty());
        }
        assert!(advance(OrderStatus::Delivered).is_none());
        assert!(cancel(OrderStatus::Delivered).is_none());
    }

    #[test]
    fn test_cancel_jumps_straight_to_cancelled() {
        assert_eq!(
            cancel(OrderStatus::Shipped),
            Some(Transition { from: OrderStatus::Shipped, to: OrderStatus::Cancelled })
        );
        assert_eq!(
            allowed_transitions(OrderStatus::Pending),
            vec![OrderStatus::Confirmed, OrderStatus::Cancelled]
        );
    }
}
