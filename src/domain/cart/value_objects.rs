use serde::{Deserialize, Serialize};

use crate::domain::order::OrderItem;

// ============================================================================
// Cart Value Objects
// ============================================================================

/// The catalog fields the cart needs to price a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    /// Selling unit, e.g. "kg"
    #[serde(default)]
    pub unit: String,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, unit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            unit: unit.into(),
        }
    }
}

/// A cart entry resolved against the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: f64,
}

impl CartLine<'_> {
    /// Copy the current product values into an order line
    pub fn to_order_item(&self) -> OrderItem {
        OrderItem::new(
            self.product.id.clone(),
            self.product.name.clone(),
            self.quantity,
            self.product.price,
        )
    }
}
