use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::errors::OrderError;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Lifecycle status of an order.
///
/// Stored lowercase (`"pending"`, `"shipped"`, ...) by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a raw stored value, falling back to `Pending` for anything
    /// outside the enumeration.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!(status = raw, "Unrecognized order status, treating as pending");
            OrderStatus::Pending
        })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| OrderError::InvalidStatus(s.to_string()))
    }
}

/// Viewer context selecting which step descriptions are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Customer-facing portal
    #[default]
    Portal,
    /// Staff-facing admin console
    Admin,
}

/// A line item, copied from the product at checkout time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    /// May be fractional for products sold by weight
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub price: f64,
}

impl OrderItem {
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, quantity: f64, price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            quantity,
            price,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity
    }
}

/// Delivery contact captured at checkout
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(deserialize_with = "optional_trimmed", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "optional_trimmed", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "optional_trimmed", skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(deserialize_with = "optional_trimmed", skip_serializing_if = "Option::is_none")]
    pub delivery_notes: Option<String>,
    #[serde(deserialize_with = "optional_trimmed", skip_serializing_if = "Option::is_none")]
    pub preferred_delivery_time: Option<String>,
}

impl OrderContact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Blank optional strings are treated as absent.
fn optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        let text = match v {
            serde_json::Value::Null => return None,
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }))
}

/// Monetary aggregates over a list of line items
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub total: f64,
}

/// One entry of the forward-flow progress display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStatusStep {
    pub value: OrderStatus,
    pub label: &'static str,
    pub description: &'static str,
}

/// Who performed a status change, as shown in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub actor_id: Option<String>,
    pub actor_name: String,
}

impl Actor {
    pub const DEFAULT_NAME: &'static str = "Administrador";

    pub fn new(actor_id: Option<String>, actor_name: Option<String>) -> Self {
        let actor_name = actor_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_NAME.to_string());
        Self { actor_id, actor_name }
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// A recorded status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub status: OrderStatus,
    pub from_status: Option<OrderStatus>,
    #[serde(flatten)]
    pub actor: Actor,
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Unit Tests
// ============================================================================
