//! Order orchestrator
//!
//! Sole entry point the API layer invokes for order operations. Composes
//! pricing, the voucher engine, the delivery estimator and the status
//! machine over the repositories.

use chrono::{Local, Utc};
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::auth::CurrentUser;
use crate::db::models::{
    Dish, NewOrder, NewOrderItem, Order, OrderDetail, OrderWithCustomer, OrderWithItems,
    OrderWithRestaurant, Restaurant,
};
use crate::db::repository::{
    CustomerRepository, DishRepository, OrderListFilter, OrderRepository, RepoError,
    RestaurantRepository,
};
use crate::orders::money::{to_decimal, to_f64};
use crate::orders::{estimate, pricing};
use crate::utils::time;
use crate::utils::validation::{MAX_NOTE_LEN, collect_required_text, validate_optional_text};
use crate::vouchers::{VoucherEngine, calculate_discount};
use shared::models::{
    CreateOrderRequest, OrderStatus, UserRole, ValidateVoucherRequest, ValidateVoucherResponse,
};
use shared::{AppError, AppResult, ErrorCode};

/// Order orchestrator
///
/// All repositories share the one injected database handle.
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    restaurants: RestaurantRepository,
    dishes: DishRepository,
    customers: CustomerRepository,
    vouchers: VoucherEngine,
}

impl OrderService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            restaurants: RestaurantRepository::new(db.clone()),
            dishes: DishRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            vouchers: VoucherEngine::new(db),
        }
    }

    /// Place an order for the customer owning `user`
    ///
    /// Sequence: structural validation (batched) -> restaurant exists and is
    /// open -> dish ownership (batched) -> pricing and voucher -> customer
    /// address snapshot -> delivery estimate -> persist (one transaction) ->
    /// voucher usage increment last.
    pub async fn create_order(
        &self,
        user: &RecordId,
        req: CreateOrderRequest,
    ) -> AppResult<OrderWithItems> {
        // 1. Structural validation, all violations collected
        let mut violations = Vec::new();
        collect_required_text(&mut violations, &req.restaurant_id, "restaurant_id");
        violations.extend(pricing::validate_items(&req.items));
        if let Err(e) = validate_optional_text(&req.customer_notes, "customer_notes", MAX_NOTE_LEN)
        {
            violations.push(e.message);
        }
        if !violations.is_empty() {
            return Err(AppError::validation_batch(violations));
        }

        // 2. Restaurant must exist and be open right now
        let restaurant = self.load_restaurant(&req.restaurant_id).await?;
        let restaurant_id = record_id_of(&restaurant.id, "restaurant")?;
        let now_local = Local::now();
        if !time::is_open_at(&restaurant.opening_hours, now_local) {
            return Err(AppError::with_message(
                ErrorCode::RestaurantClosed,
                format!("Restaurant '{}' is currently closed", restaurant.name),
            ));
        }

        // 3. Every dish must exist and belong to the stated restaurant
        let mut dishes: Vec<Option<Dish>> = Vec::with_capacity(req.items.len());
        for item in &req.items {
            match self.dishes.find_by_id(&item.dish_id).await {
                Ok(dish) => dishes.push(dish),
                // A malformed id is indistinguishable from a missing dish
                Err(RepoError::Validation(_)) => dishes.push(None),
                Err(e) => return Err(e.into()),
            }
        }
        let mismatches = pricing::validate_dish_ownership(&req.items, &dishes, &restaurant_id);
        if !mismatches.is_empty() {
            return Err(AppError::validation_batch(mismatches));
        }
        let dishes: Vec<Dish> = dishes.into_iter().flatten().collect();

        // 4. Pricing, with the voucher applied if one was supplied
        let cart = pricing::price_cart(&req.items, dishes);
        let voucher = match &req.voucher_code {
            Some(code) => {
                match self
                    .vouchers
                    .validate(code, Some(&restaurant_id), Utc::now())
                    .await?
                {
                    Ok(voucher) => Some(voucher),
                    Err(rejection) => return Err(rejection.into()),
                }
            }
            None => None,
        };
        let discount_amount = voucher
            .as_ref()
            .map(|v| calculate_discount(v, cart.subtotal))
            .unwrap_or(0.0);
        let final_price = to_f64(
            (to_decimal(cart.subtotal) - to_decimal(discount_amount)).max(Decimal::ZERO),
        );

        // 5. Snapshot the customer's delivery address
        let customer = self
            .customers
            .find_by_user(user)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;
        let customer_id = record_id_of(&customer.id, "customer")?;

        // 6. Delivery estimate, computed once
        let cooking_times: Vec<i32> = cart
            .lines
            .iter()
            .map(|line| line.dish.cooking_time_minutes)
            .collect();
        let estimated_delivery_minutes =
            estimate::estimate_delivery_minutes(&cooking_times, now_local);

        // 7. Persist order + items + pending history in one transaction
        let voucher_id = voucher.as_ref().and_then(|v| v.id.clone());
        let new_order = NewOrder {
            restaurant: restaurant_id,
            customer: customer_id,
            order_date: time::calendar_date(now_local),
            subtotal: cart.subtotal,
            discount_amount,
            final_price,
            voucher: voucher_id.clone(),
            voucher_code: voucher.as_ref().map(|v| v.code.clone()),
            delivery_address: customer.delivery_address.clone(),
            estimated_delivery_minutes,
            customer_notes: req.customer_notes.clone(),
            created_at: time::now_rfc3339(),
        };
        let new_items: Vec<NewOrderItem> = cart
            .lines
            .iter()
            .map(|line| NewOrderItem {
                dish: line.dish.id.clone(),
                dish_name: line.dish.name.clone(),
                dish_price: line.dish.price,
                quantity: line.quantity,
                subtotal: line.line_subtotal,
            })
            .collect();
        let order = self.orders.create_with_items(new_order, new_items).await?;
        let order_id = record_id_of(&order.id, "order")?;

        // Voucher usage is counted last and only once per successful order.
        // The order is already committed, so a failure here is logged and
        // never surfaced to the caller.
        if let Some(voucher_id) = &voucher_id {
            match self.vouchers.increment_usage(voucher_id).await {
                Ok(true) => {}
                Ok(false) => tracing::error!(
                    order = %order_id,
                    voucher = %voucher_id,
                    "Voucher usage cap hit after order commit; usage not counted"
                ),
                Err(e) => tracing::error!(
                    order = %order_id,
                    voucher = %voucher_id,
                    "Failed to increment voucher usage after order commit: {e}"
                ),
            }
        }

        // 8. Return the order enriched with its items
        let items = self.orders.find_items(&order_id).await?;
        Ok(OrderWithItems { order, items })
    }

    /// Accept a pending order (restaurant owner)
    pub async fn accept_order(&self, order_id: &str, owner: &RecordId) -> AppResult<Order> {
        let (order, order_ref) = self.load_order_authorized(order_id, owner).await?;
        self.require_pending(&order)?;
        Ok(self
            .orders
            .transition(&order_ref, OrderStatus::Accepted, None, time::now_rfc3339())
            .await?)
    }

    /// Reject a pending order (restaurant owner), with an optional reason
    pub async fn reject_order(
        &self,
        order_id: &str,
        owner: &RecordId,
        reason: Option<String>,
    ) -> AppResult<Order> {
        validate_optional_text(&reason, "reason", MAX_NOTE_LEN)?;
        let (order, order_ref) = self.load_order_authorized(order_id, owner).await?;
        self.require_pending(&order)?;
        Ok(self
            .orders
            .transition(&order_ref, OrderStatus::Rejected, reason, time::now_rfc3339())
            .await?)
    }

    /// Move an order along its lifecycle (restaurant owner)
    pub async fn update_order_status(
        &self,
        order_id: &str,
        owner: &RecordId,
        new_status: OrderStatus,
        notes: Option<String>,
    ) -> AppResult<Order> {
        validate_optional_text(&notes, "notes", MAX_NOTE_LEN)?;
        let (order, order_ref) = self.load_order_authorized(order_id, owner).await?;

        if order.status.is_terminal() {
            return Err(AppError::with_message(
                ErrorCode::OrderAlreadyFinal,
                format!("Order is already in final status '{}'", order.status),
            ));
        }
        if !order.status.can_transition_to(new_status) {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Invalid transition from {} to {}", order.status, new_status),
            ));
        }

        Ok(self
            .orders
            .transition(&order_ref, new_status, notes, time::now_rfc3339())
            .await?)
    }

    /// Full order view: items plus the status audit trail
    ///
    /// A customer must own the order; a restaurant owner must own the
    /// order's restaurant (resolved through the owner's restaurant list).
    pub async fn get_order_details(
        &self,
        order_id: &str,
        user: &CurrentUser,
    ) -> AppResult<OrderDetail> {
        let order = self.load_order(order_id).await?;
        let order_ref = record_id_of(&order.id, "order")?;
        let user_id = user.record_id()?;

        match user.role {
            UserRole::Customer => {
                let customer = self
                    .customers
                    .find_by_user(&user_id)
                    .await?
                    .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;
                if customer.id.as_ref() != Some(&order.customer) {
                    return Err(AppError::permission_denied("Not your order"));
                }
            }
            UserRole::RestaurantOwner => {
                let owned = self.restaurants.find_by_owner(&user_id).await?;
                let owns_restaurant = owned
                    .iter()
                    .any(|r| r.id.as_ref() == Some(&order.restaurant));
                if !owns_restaurant {
                    return Err(AppError::permission_denied(
                        "Order belongs to another restaurant",
                    ));
                }
            }
        }

        let items = self.orders.find_items(&order_ref).await?;
        let status_history = self.orders.find_history(&order_ref).await?;
        Ok(OrderDetail {
            order,
            items,
            status_history,
        })
    }

    /// Orders placed by the calling customer
    pub async fn get_customer_orders(
        &self,
        user: &RecordId,
        filter: OrderListFilter,
    ) -> AppResult<Vec<OrderWithRestaurant>> {
        let customer = self
            .customers
            .find_by_user(user)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;
        let customer_id = record_id_of(&customer.id, "customer")?;
        Ok(self.orders.list_by_customer(&customer_id, &filter).await?)
    }

    /// Orders of one of the caller's restaurants
    pub async fn get_restaurant_orders(
        &self,
        restaurant_id: &str,
        owner: &RecordId,
        filter: OrderListFilter,
    ) -> AppResult<Vec<OrderWithCustomer>> {
        let restaurant = self.load_restaurant(restaurant_id).await?;
        if restaurant.owner != *owner {
            return Err(AppError::permission_denied(
                "Not the owner of this restaurant",
            ));
        }
        let restaurant_ref = record_id_of(&restaurant.id, "restaurant")?;
        Ok(self
            .orders
            .list_by_restaurant(&restaurant_ref, &filter)
            .await?)
    }

    /// Standalone voucher validation (checkout preview)
    ///
    /// Unlike order creation, a voucher that would reduce the order total to
    /// zero or below is reported invalid here.
    pub async fn validate_voucher(
        &self,
        req: ValidateVoucherRequest,
    ) -> AppResult<ValidateVoucherResponse> {
        let restaurant_scope: Option<RecordId> = match &req.restaurant_id {
            Some(id) => Some(
                id.parse()
                    .map_err(|_| AppError::validation(format!("Invalid restaurant ID: {id}")))?,
            ),
            None => None,
        };

        let voucher = match self
            .vouchers
            .validate(&req.code, restaurant_scope.as_ref(), Utc::now())
            .await?
        {
            Ok(voucher) => voucher,
            Err(rejection) => return Ok(ValidateVoucherResponse::invalid(rejection.reason())),
        };

        let Some(order_amount) = req.order_amount else {
            return Ok(ValidateVoucherResponse::valid());
        };

        let discount_amount = calculate_discount(&voucher, order_amount);
        let final_price = to_f64(
            (to_decimal(order_amount) - to_decimal(discount_amount)).max(Decimal::ZERO),
        );
        if final_price <= 0.0 {
            return Ok(ValidateVoucherResponse::invalid("final price is 0"));
        }
        Ok(ValidateVoucherResponse::valid_with_discount(
            discount_amount,
            final_price,
        ))
    }

    // ==================== internals ====================

    async fn load_order(&self, order_id: &str) -> AppResult<Order> {
        match self.orders.find_by_id(order_id).await {
            Ok(Some(order)) => Ok(order),
            Ok(None) | Err(RepoError::Validation(_)) => Err(AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", order_id),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_restaurant(&self, restaurant_id: &str) -> AppResult<Restaurant> {
        match self.restaurants.find_by_id(restaurant_id).await {
            Ok(Some(restaurant)) => Ok(restaurant),
            Ok(None) | Err(RepoError::Validation(_)) => Err(AppError::with_message(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant {} not found", restaurant_id),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Load an order and verify `owner` owns its restaurant
    ///
    /// The authorization check runs before any status check.
    async fn load_order_authorized(
        &self,
        order_id: &str,
        owner: &RecordId,
    ) -> AppResult<(Order, RecordId)> {
        let order = self.load_order(order_id).await?;
        let restaurant = self.load_restaurant(&order.restaurant.to_string()).await?;
        if restaurant.owner != *owner {
            return Err(AppError::permission_denied(
                "Not the owner of this restaurant",
            ));
        }
        let order_ref = record_id_of(&order.id, "order")?;
        Ok((order, order_ref))
    }

    fn require_pending(&self, order: &Order) -> AppResult<()> {
        if order.status != OrderStatus::Pending {
            return Err(AppError::with_message(
                ErrorCode::OrderNotPending,
                format!("Order is not in pending status (current: {})", order.status),
            ));
        }
        Ok(())
    }
}

/// A record loaded from the store always carries its id
fn record_id_of(id: &Option<RecordId>, entity: &str) -> AppResult<RecordId> {
    id.clone()
        .ok_or_else(|| AppError::internal(format!("{entity} record is missing its id")))
}
