use serde::{Deserialize, Serialize};
use serde_json::Value;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::order::{
    workflow, Audience, OrderAggregate, OrderContact, OrderItem, OrderStatus, OrderTotals, TimelineEntry,
};

// ============================================================================
// Read Models
// ============================================================================
//
// Order records as the storefront's document store hands them over. Mapping
// is lenient: a malformed document still yields an order with defaults
// rather than an error.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_display_name: Option<String>,
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<OrderContact>,
}

impl Order {
    /// Map a raw document. Returns `None` only when there is no document.
    pub fn from_document(id: impl Into<String>, data: Option<&Value>) -> Option<Self> {
        let data = data.filter(|d| !d.is_null())?;

        let created_at = data.get("createdAt").and_then(coerce_date).unwrap_or_else(Utc::now);
        let updated_at = data.get("updatedAt").and_then(coerce_date).unwrap_or(created_at);

        let items = data
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(map_item).collect())
            .unwrap_or_default();

        let contact = data
            .get("contact")
            .filter(|c| c.is_object())
            .and_then(|c| serde_json::from_value::<OrderContact>(c.clone()).ok());

        let total = first_number(data, &["total", "totalAmount"]);
        let total_amount = first_number(data, &["totalAmount", "total"]);

        let status = match data.get("status") {
            Some(Value::String(raw)) => OrderStatus::parse_lenient(raw),
            Some(Value::Null) | None => OrderStatus::Pending,
            Some(other) => OrderStatus::parse_lenient(&other.to_string()),
        };

        Some(Self {
            id: id.into(),
            user_id: data.get("userId").map(coerce_string).unwrap_or_default(),
            items,
            total,
            status,
            created_at,
            updated_at,
            user_display_name: data
                .get("userDisplayName")
                .filter(|v| !v.is_null())
                .map(coerce_string),
            total_amount,
            contact,
        })
    }

    pub fn totals(&self) -> OrderTotals {
        workflow::totals(&self.items)
    }

    pub fn status_label(&self) -> &'static str {
        workflow::label(self.status)
    }

    pub fn badge_style(&self) -> &'static str {
        workflow::badge_style(self.status)
    }

    pub fn step_index(&self) -> i32 {
        workflow::step_index(self.status)
    }

    pub fn timeline(&self, audience: Audience) -> Option<Vec<TimelineEntry>> {
        workflow::timeline(self.status, audience)
    }

    pub fn next_status(&self) -> Option<OrderStatus> {
        workflow::next_status(self.status)
    }

    pub fn can_cancel(&self) -> bool {
        workflow::can_cancel(self.status)
    }

    pub fn can_cancel_as(&self, audience: Audience) -> bool {
        workflow::can_cancel_as(self.status, audience)
    }
}

impl From<&OrderAggregate> for Order {
    fn from(aggregate: &OrderAggregate) -> Self {
        Self {
            id: aggregate.id.clone(),
            user_id: aggregate.user_id.clone(),
            items: aggregate.items.clone(),
            total: aggregate.total,
            status: aggregate.status,
            created_at: aggregate.created_at,
            updated_at: aggregate.updated_at,
            user_display_name: aggregate.user_display_name.clone(),
            total_amount: aggregate.total,
            contact: aggregate.contact.clone(),
        }
    }
}

// ============================================================================
// Coercion Helpers
// ============================================================================

fn map_item(value: &Value) -> Option<OrderItem> {
    let item = value.as_object()?;
    Some(OrderItem {
        product_id: item.get("productId").map(coerce_string).unwrap_or_default(),
        name: item.get("name").map(coerce_string).unwrap_or_default(),
        quantity: item.get("quantity").and_then(coerce_number).unwrap_or(0.0),
        price: item.get("price").and_then(coerce_number).unwrap_or(0.0),
    })
}

fn first_number(data: &Value, keys: &[&str]) -> f64 {
    keys.iter()
        .find_map(|key| data.get(*key).filter(|v| !v.is_null()))
        .and_then(coerce_number)
        .unwrap_or(0.0)
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Accepts RFC 3339 strings, epoch milliseconds, and `{seconds, nanoseconds}`
/// timestamp objects.
fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Value::Object(fields) => {
            let seconds = fields.get("seconds").and_then(Value::as_i64)?;
            let nanos = fields
                .get("nanoseconds")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, nanos as u32).single()
        }
        _ => None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_document_maps_to_none() {
        assert!(Order::from_document("a", None).is_none());
        assert!(Order::from_document("a", Some(&Value::Null)).is_none());
    }

    #[test]
    fn test_full_document_mapping() {
        let doc = json!({
            "userId": "user-1",
            "items": [
                {"productId": "salmon", "name": "Salmon", "quantity": 2, "price": 1800},
                {"productId": "merluza", "name": "Merluza", "quantity": "1", "price": 950.5},
                "not an item"
            ],
            "total": 4550.5,
            "status": "shipped",
            "createdAt": "2026-03-01T12:00:00Z",
            "updatedAt": 1772452800000_i64,
            "userDisplayName": "Ana Perez",
            "contact": {
                "firstName": "Ana",
                "lastName": "Perez",
                "email": "ana@example.com",
                "address": "Av. Costanera 100",
                "city": "Mar del Plata",
                "state": "Buenos Aires",
                "zipCode": "7600",
                "deliveryNotes": ""
            }
        });

        let order = Order::from_document("order-1", Some(&doc)).unwrap();

        assert_eq!(order.id, "order-1");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[1].quantity, 1.0);
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total, 4550.5);
        assert_eq!(order.total_amount, 4550.5);
        assert_eq!(order.totals().total, 4550.5);
        assert_eq!(order.status_label(), "En transito");
        assert_eq!(order.step_index(), 3);
        assert_eq!(order.next_status(), Some(OrderStatus::Delivered));
        assert!(order.updated_at > order.created_at);
        assert_eq!(order.contact.as_ref().unwrap().delivery_notes, None);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let doc = json!({
            "totalAmount": 1200,
            "createdAt": {"seconds": 1772366400, "nanoseconds": 0}
        });

        let order = Order::from_document("order-2", Some(&doc)).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_id, "");
        assert!(order.items.is_empty());
        assert_eq!(order.total, 1200.0);
        assert_eq!(order.total_amount, 1200.0);
        assert_eq!(order.updated_at, order.created_at);
        assert!(order.contact.is_none());
        assert!(order.user_display_name.is_none());
    }

    #[test]
    fn test_unknown_status_is_treated_as_pending() {
        let doc = json!({"status": "en-camino"});
        let order = Order::from_document("order-3", Some(&doc)).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.badge_style(), "bg-gray-100 text-gray-700");
    }

    #[test]
    fn test_cancelled_order_has_no_timeline() {
        let doc = json!({"status": "cancelled"});
        let order = Order::from_document("order-4", Some(&doc)).unwrap();

        assert!(order.timeline(Audience::Portal).is_none());
        assert!(!order.can_cancel());
        assert!(!order.can_cancel_as(Audience::Portal));
        assert_eq!(order.step_index(), -1);
    }

    #[test]
    fn test_serializes_with_storefront_field_names() {
        let doc = json!({"userId": "u", "status": "confirmed", "total": 10});
        let order = Order::from_document("order-5", Some(&doc)).unwrap();
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["userId"], "u");
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["totalAmount"], 10.0);
        assert!(json.get("contact").is_none());
    }
}
