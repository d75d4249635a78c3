use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::order::{workflow, OrderCommand, OrderContact, OrderItem, DEFAULT_CUSTOMER_NAME};
use crate::models::Order;
use super::errors::CartError;
use super::value_objects::{CartLine, Product};

pub const GUEST_USER_ID: &str = "guest";

// ============================================================================
// Cart - product id → quantity
// ============================================================================
//
// A plain value: every operation takes the cart and returns the next one.
// Stored by the storefront as a JSON object, e.g. {"salmon": 1.5}.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<String, f64>,
}

/// Stored entries go through `with_quantity`, so non-positive quantities are dropped.
impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = BTreeMap::<String, f64>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .fold(Cart::new(), |cart, (product_id, quantity)| cart.with_quantity(product_id, quantity)))
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> Result<Self, CartError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse a stored cart, starting over with an empty one when the stored
    /// value is missing or unreadable.
    pub fn load_or_empty(raw: Option<&str>) -> Self {
        match raw.map(Self::from_json) {
            Some(Ok(cart)) => cart,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Unable to parse stored cart, starting empty");
                Self::new()
            }
            None => Self::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn quantity(&self, product_id: &str) -> Option<f64> {
        self.entries.get(product_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Set the quantity of a product; zero or less removes it.
    pub fn with_quantity(mut self, product_id: impl Into<String>, quantity: f64) -> Self {
        let product_id = product_id.into();
        if quantity > 0.0 && quantity.is_finite() {
            self.entries.insert(product_id, quantity);
        } else {
            self.entries.remove(&product_id);
        }
        self
    }

    pub fn without(mut self, product_id: &str) -> Self {
        self.entries.remove(product_id);
        self
    }

    pub fn cleared(self) -> Self {
        Self::new()
    }

    /// Add every line of a past order on top of what is already in the cart
    pub fn with_order_repeated(self, order: &Order) -> Self {
        order.items.iter().fold(self, |cart, item| {
            let existing = cart.quantity(&item.product_id).unwrap_or(0.0);
            cart.with_quantity(item.product_id.clone(), existing + item.quantity)
        })
    }

    /// Lines whose product is still in the catalog
    pub fn lines<'a>(&self, catalog: &'a [Product]) -> Vec<CartLine<'a>> {
        self.entries
            .iter()
            .filter_map(|(product_id, &quantity)| {
                catalog
                    .iter()
                    .find(|p| &p.id == product_id)
                    .map(|product| CartLine { product, quantity })
            })
            .collect()
    }

    pub fn order_items(&self, catalog: &[Product]) -> Vec<OrderItem> {
        self.lines(catalog).iter().map(CartLine::to_order_item).collect()
    }

    pub fn item_count(&self, catalog: &[Product]) -> f64 {
        workflow::item_count(&self.order_items(catalog))
    }

    pub fn total(&self, catalog: &[Product]) -> f64 {
        workflow::totals(&self.order_items(catalog)).total
    }

    /// Build the command that places this cart as a new pending order.
    pub fn checkout(
        &self,
        catalog: &[Product],
        user_id: Option<&str>,
        user_display_name: Option<&str>,
        contact: OrderContact,
    ) -> Result<OrderCommand, CartError> {
        let items = self.order_items(catalog);
        if items.is_empty() {
            return Err(CartError::Empty);
        }

        let user_display_name = user_display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| Some(contact.full_name()).filter(|name| !name.is_empty()))
            .unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string());

        let order_id = Uuid::new_v4().to_string();
        tracing::debug!(order_id = %order_id, lines = items.len(), "Checking out cart");

        Ok(OrderCommand::PlaceOrder {
            order_id,
            user_id: user_id.unwrap_or(GUEST_USER_ID).to_string(),
            user_display_name: Some(user_display_name),
            items,
            contact: Some(contact),
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
