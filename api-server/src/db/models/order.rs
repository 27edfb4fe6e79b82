//! Order persistence models
//!
//! The order row snapshots everything a later profile or menu edit must not
//! change: the delivery address, dish names and dish prices.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::models::{DeliveryAddress, OrderStatus};

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Restaurant reference, immutable after creation
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    /// Customer reference, immutable after creation
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    /// Per-restaurant, per-day display number (starts at 1 each day)
    pub daily_order_number: i64,
    /// Calendar date the daily number is scoped to (YYYY-MM-DD)
    pub order_date: String,
    pub status: OrderStatus,
    /// Sum of line subtotals, 2-decimal
    pub subtotal: f64,
    /// Voucher discount, 2-decimal, 0 when no voucher applied
    pub discount_amount: f64,
    /// `subtotal - discount_amount`, 2-decimal, never negative
    pub final_price: f64,
    /// Applied voucher; set together with `voucher_code` or not at all
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub voucher: Option<RecordId>,
    #[serde(default)]
    pub voucher_code: Option<String>,
    /// Address snapshot taken from the customer profile at creation
    pub delivery_address: DeliveryAddress,
    /// Estimate computed once at creation, never recalculated
    pub estimated_delivery_minutes: i32,
    #[serde(default)]
    pub customer_notes: Option<String>,
    #[serde(default)]
    pub restaurant_notes: Option<String>,
    // Per-transition timestamps, each set exactly once (ISO-8601)
    #[serde(default)]
    pub accepted_at: Option<String>,
    #[serde(default)]
    pub rejected_at: Option<String>,
    #[serde(default)]
    pub preparing_started_at: Option<String>,
    #[serde(default)]
    pub ready_at: Option<String>,
    #[serde(default)]
    pub delivering_started_at: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
    pub created_at: String,
}

/// Order line item snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    /// Source dish; None once the dish is deleted from the menu
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub dish: Option<RecordId>,
    /// Name captured at order time
    pub dish_name: String,
    /// Price captured at order time
    pub dish_price: f64,
    pub quantity: i32,
    /// `dish_price * quantity`, 2-decimal
    pub subtotal: f64,
}

/// Append-only status audit row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusHistory {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    pub status: OrderStatus,
    pub changed_at: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// New order draft, persisted by `OrderRepository::create_with_items`
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub restaurant: RecordId,
    pub customer: RecordId,
    pub order_date: String,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub voucher: Option<RecordId>,
    pub voucher_code: Option<String>,
    pub delivery_address: DeliveryAddress,
    pub estimated_delivery_minutes: i32,
    pub customer_notes: Option<String>,
    pub created_at: String,
}

/// New line item draft
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub dish: Option<RecordId>,
    pub dish_name: String,
    pub dish_price: f64,
    pub quantity: i32,
    pub subtotal: f64,
}

/// Order enriched with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Order enriched with items and the full status audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub status_history: Vec<OrderStatusHistory>,
}

/// List view for customers (order + restaurant name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithRestaurant {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub restaurant_name: Option<String>,
}

/// List view for restaurant staff (order + customer display name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithCustomer {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub customer_name: Option<String>,
}
