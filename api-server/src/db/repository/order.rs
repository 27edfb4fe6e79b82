//! Order repository
//!
//! Order creation and status transitions are multi-row writes; both run as a
//! single store transaction so status, items and history can never split.
//! The daily order number comes from a per-(restaurant, date) counter record
//! incremented inside the creation transaction, not from MAX+1.

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderStatusHistory, OrderWithCustomer,
    OrderWithRestaurant,
};
use shared::models::OrderStatus;

const ORDER_TABLE: &str = "order";

/// List filters shared by the customer and restaurant order views
#[derive(Debug, Clone, Default)]
pub struct OrderListFilter {
    pub status: Option<OrderStatus>,
    /// Inclusive lower bound on order_date (YYYY-MM-DD)
    pub from_date: Option<String>,
    /// Inclusive upper bound on order_date (YYYY-MM-DD)
    pub to_date: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Line item bind shape for the creation transaction
#[derive(Debug, Clone, Serialize)]
struct ItemBind {
    #[serde(skip_serializing_if = "Option::is_none")]
    dish_key: Option<String>,
    dish_name: String,
    dish_price: f64,
    quantity: i32,
    subtotal: f64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid order ID: {}", id)))?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Line items of an order
    pub async fn find_items(&self, order: &RecordId) -> RepoResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order_id = $order")
            .bind(("order", order.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Status audit trail of an order, oldest first
    pub async fn find_history(&self, order: &RecordId) -> RepoResult<Vec<OrderStatusHistory>> {
        let history: Vec<OrderStatusHistory> = self
            .base
            .db()
            .query("SELECT * FROM order_status_history WHERE order_id = $order ORDER BY changed_at ASC")
            .bind(("order", order.clone()))
            .await?
            .take(0)?;
        Ok(history)
    }

    /// Persist a new order, its items and the initial pending history row
    ///
    /// One transaction covers:
    /// 1. the per-(restaurant, order_date) counter increment that assigns
    ///    `daily_order_number` (1, 2, 3, ... per restaurant per day),
    /// 2. the order row at `pending`,
    /// 3. the initial `pending` status-history row,
    /// 4. all line item rows.
    pub async fn create_with_items(
        &self,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> RepoResult<Order> {
        let order_key = Uuid::new_v4().simple().to_string();

        let item_binds: Vec<ItemBind> = items
            .into_iter()
            .map(|item| ItemBind {
                dish_key: item.dish.as_ref().map(|d| d.key().to_string()),
                dish_name: item.dish_name,
                dish_price: item.dish_price,
                quantity: item.quantity,
                subtotal: item.subtotal,
            })
            .collect();

        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION;

                LET $counter = (UPSERT type::thing('daily_counter', [$restaurant, $order_date]) SET next += 1);

                CREATE type::thing('order', $order_key) SET
                    restaurant = $restaurant,
                    customer = $customer,
                    daily_order_number = $counter[0].next,
                    order_date = $order_date,
                    status = $status,
                    subtotal = $subtotal,
                    discount_amount = $discount_amount,
                    final_price = $final_price,
                    voucher = $voucher,
                    voucher_code = $voucher_code,
                    delivery_address = $delivery_address,
                    estimated_delivery_minutes = $estimated_delivery_minutes,
                    customer_notes = $customer_notes,
                    restaurant_notes = NONE,
                    created_at = $created_at;

                CREATE order_status_history SET
                    order_id = type::thing('order', $order_key),
                    status = $status,
                    changed_at = $created_at,
                    notes = NONE;

                FOR $item IN $items {
                    CREATE order_item CONTENT {
                        order_id: type::thing('order', $order_key),
                        dish: IF $item.dish_key != NONE THEN type::thing('dish', $item.dish_key) ELSE NONE END,
                        dish_name: $item.dish_name,
                        dish_price: $item.dish_price,
                        quantity: $item.quantity,
                        subtotal: $item.subtotal
                    };
                };

                COMMIT TRANSACTION;",
            )
            .bind(("order_key", order_key.clone()))
            .bind(("restaurant", order.restaurant))
            .bind(("customer", order.customer))
            .bind(("order_date", order.order_date))
            .bind(("status", OrderStatus::Pending))
            .bind(("subtotal", order.subtotal))
            .bind(("discount_amount", order.discount_amount))
            .bind(("final_price", order.final_price))
            .bind(("voucher", order.voucher))
            .bind(("voucher_code", order.voucher_code))
            .bind(("delivery_address", order.delivery_address))
            .bind(("estimated_delivery_minutes", order.estimated_delivery_minutes))
            .bind(("customer_notes", order.customer_notes))
            .bind(("created_at", order.created_at))
            .bind(("items", item_binds))
            .await?;

        response.check()?;

        let created: Option<Order> = self
            .base
            .db()
            .select(RecordId::from_table_key(ORDER_TABLE, order_key))
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Apply a status transition and append its audit row, atomically
    ///
    /// Updates `status` plus the per-status timestamp column (if the target
    /// status has one) and creates the matching history row. Legality of the
    /// transition is the caller's concern; this method only persists it.
    pub async fn transition(
        &self,
        order: &RecordId,
        new_status: OrderStatus,
        notes: Option<String>,
        now: String,
    ) -> RepoResult<Order> {
        // Column name comes from the status enum, never from user input
        let timestamp_clause = new_status
            .timestamp_field()
            .map(|column| format!(", {} = $now", column))
            .unwrap_or_default();

        let sql = format!(
            "BEGIN TRANSACTION;

            UPDATE $order SET status = $status{timestamp_clause};

            CREATE order_status_history SET
                order_id = $order,
                status = $status,
                changed_at = $now,
                notes = $notes;

            COMMIT TRANSACTION;"
        );

        let response = self
            .base
            .db()
            .query(sql)
            .bind(("order", order.clone()))
            .bind(("status", new_status))
            .bind(("now", now))
            .bind(("notes", notes))
            .await?;

        response.check()?;

        let updated: Option<Order> = self.base.db().select(order.clone()).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", order)))
    }

    /// Orders placed by a customer, newest first, enriched with the
    /// restaurant name
    pub async fn list_by_customer(
        &self,
        customer: &RecordId,
        filter: &OrderListFilter,
    ) -> RepoResult<Vec<OrderWithRestaurant>> {
        let sql = format!(
            "SELECT *, restaurant.name AS restaurant_name FROM order WHERE customer = $customer{} ORDER BY created_at DESC LIMIT $limit START $offset",
            filter_clauses(filter)
        );
        let orders: Vec<OrderWithRestaurant> = self
            .bind_filter(self.base.db().query(sql), filter)
            .bind(("customer", customer.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders of a restaurant, newest first, enriched with the customer's
    /// display name
    pub async fn list_by_restaurant(
        &self,
        restaurant: &RecordId,
        filter: &OrderListFilter,
    ) -> RepoResult<Vec<OrderWithCustomer>> {
        let sql = format!(
            "SELECT *, customer.user.display_name AS customer_name FROM order WHERE restaurant = $restaurant{} ORDER BY created_at DESC LIMIT $limit START $offset",
            filter_clauses(filter)
        );
        let orders: Vec<OrderWithCustomer> = self
            .bind_filter(self.base.db().query(sql), filter)
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    fn bind_filter<'a>(
        &self,
        mut query: surrealdb::method::Query<'a, Db>,
        filter: &OrderListFilter,
    ) -> surrealdb::method::Query<'a, Db> {
        query = query
            .bind(("limit", filter.limit))
            .bind(("offset", filter.offset));
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }
        if let Some(from_date) = &filter.from_date {
            query = query.bind(("from_date", from_date.clone()));
        }
        if let Some(to_date) = &filter.to_date {
            query = query.bind(("to_date", to_date.clone()));
        }
        query
    }
}

/// Optional WHERE fragments for the list views
fn filter_clauses(filter: &OrderListFilter) -> String {
    let mut clauses = String::new();
    if filter.status.is_some() {
        clauses.push_str(" AND status = $status");
    }
    if filter.from_date.is_some() {
        clauses.push_str(" AND order_date >= $from_date");
    }
    if filter.to_date.is_some() {
        clauses.push_str(" AND order_date <= $to_date");
    }
    clauses
}
