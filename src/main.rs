use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use seafood_orders::config::AppConfig;
use seafood_orders::domain::cart::{Cart, Product};
use seafood_orders::domain::order::{command_handler, Actor, OrderCommand, OrderContact, StepState};
use seafood_orders::models::Order;
use seafood_orders::workflow;

fn main() -> anyhow::Result<()> {
    AppConfig::load_env_file()?;
    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
        )
        .init();

    tracing::info!(audience = ?config.audience, "Order workflow walk-through");

    // === 1. Fill a cart and check out ===
    let catalog = vec![
        Product::new("salmon", "Salmon rosado", 1800.0, "kg"),
        Product::new("merluza", "Merluza hubbsi", 950.5, "kg"),
        Product::new("langostinos", "Langostinos", 6000.0, "kg"),
    ];

    let cart = Cart::new()
        .with_quantity("salmon", 2.0)
        .with_quantity("merluza", 1.0);

    tracing::info!(
        items = cart.item_count(&catalog),
        total = cart.total(&catalog),
        "Cart ready"
    );

    let contact = OrderContact {
        first_name: "Ana".to_string(),
        last_name: "Perez".to_string(),
        email: "ana@example.com".to_string(),
        address: "Av. Costanera 100".to_string(),
        city: "Mar del Plata".to_string(),
        state: "Buenos Aires".to_string(),
        zip_code: "7600".to_string(),
        ..Default::default()
    };

    let place = cart.checkout(&catalog, Some("user-ana"), None, contact)?;
    let mut outcome = command_handler::execute(None, place, Uuid::new_v4())?;
    tracing::info!(
        order_id = %outcome.aggregate.id,
        total = outcome.aggregate.total,
        can_cancel = Order::from(&outcome.aggregate).can_cancel_as(config.audience),
        "✅ Order placed"
    );

    // === 2. Staff advance it until delivery ===
    let staff = Actor::new(Some("admin-1".to_string()), Some("Marta".to_string()));
    while workflow::next_status(outcome.aggregate.status).is_some() {
        outcome = command_handler::execute(
            Some(outcome.aggregate),
            OrderCommand::AdvanceStatus { actor: staff.clone(), note: None },
            Uuid::new_v4(),
        )?;

        let order = Order::from(&outcome.aggregate);
        tracing::info!(
            status = order.status_label(),
            badge = order.badge_style(),
            step = order.step_index(),
            "Status advanced"
        );
    }

    // Delivered orders can't be cancelled; the engine reports no transition
    let cancel = command_handler::execute(
        Some(outcome.aggregate.clone()),
        OrderCommand::CancelOrder { actor: staff, note: None },
        Uuid::new_v4(),
    );
    if let Err(e) = cancel {
        tracing::info!(error = %e, "Cancel rejected");
    }

    // === 3. Render the timeline and history ===
    let order = Order::from(&outcome.aggregate);
    for entry in order.timeline(config.audience).unwrap_or_default() {
        let marker = match entry.state {
            StepState::Completed => "✔",
            StepState::Current => "●",
            StepState::Upcoming => "○",
        };
        println!("{marker} {:<12} {}", entry.step.label, entry.step.description);
    }

    for entry in outcome.aggregate.status_history() {
        println!(
            "{} {:<12} {} ({})",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            workflow::label(entry.status),
            entry.note,
            entry.actor.actor_name
        );
    }

    // === 4. Repeat the order into a fresh cart ===
    let repeat = Cart::new().with_order_repeated(&order);
    tracing::info!(cart = %repeat.to_json()?, "🎉 Order repeated into cart");

    Ok(())
}
