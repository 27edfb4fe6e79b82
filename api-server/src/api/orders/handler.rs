//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderDetail, OrderWithCustomer, OrderWithItems, OrderWithRestaurant};
use crate::db::repository::OrderListFilter;
use crate::utils::time;
use shared::models::{
    CreateOrderRequest, OrderStatus, RejectOrderRequest, UpdateOrderStatusRequest,
};
use shared::{AppError, AppResult, ErrorCode};

/// Query params for order list views
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl ListQuery {
    fn into_filter(self) -> AppResult<OrderListFilter> {
        if let Some(from_date) = &self.from_date {
            time::parse_date(from_date)?;
        }
        if let Some(to_date) = &self.to_date {
            time::parse_date(to_date)?;
        }
        if self.offset < 0 {
            return Err(AppError::validation("offset must not be negative"));
        }
        Ok(OrderListFilter {
            status: self.status,
            from_date: self.from_date,
            to_date: self.to_date,
            limit: self.limit.clamp(1, 200),
            offset: self.offset,
        })
    }
}

/// Place an order (customers)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderWithItems>> {
    require_customer(&user)?;
    let service = state.order_service();
    let order = service.create_order(&user.record_id()?, payload).await?;
    tracing::info!(
        order = ?order.order.id,
        restaurant = %order.order.restaurant,
        number = order.order.daily_order_number,
        "Order placed"
    );
    Ok(Json(order))
}

/// Order detail with items and status history
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let service = state.order_service();
    let detail = service.get_order_details(&id, &user).await?;
    Ok(Json(detail))
}

/// The calling customer's own orders
pub async fn list_own(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderWithRestaurant>>> {
    require_customer(&user)?;
    let filter = query.into_filter()?;
    let service = state.order_service();
    let orders = service
        .get_customer_orders(&user.record_id()?, filter)
        .await?;
    Ok(Json(orders))
}

/// Orders of one restaurant (its owner)
pub async fn list_for_restaurant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(restaurant_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderWithCustomer>>> {
    require_owner(&user)?;
    let filter = query.into_filter()?;
    let service = state.order_service();
    let orders = service
        .get_restaurant_orders(&restaurant_id, &user.record_id()?, filter)
        .await?;
    Ok(Json(orders))
}

/// Accept a pending order (restaurant owner)
pub async fn accept(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    require_owner(&user)?;
    let service = state.order_service();
    let order = service.accept_order(&id, &user.record_id()?).await?;
    Ok(Json(order))
}

/// Reject a pending order with an optional reason (restaurant owner)
pub async fn reject(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RejectOrderRequest>,
) -> AppResult<Json<Order>> {
    require_owner(&user)?;
    let service = state.order_service();
    let order = service
        .reject_order(&id, &user.record_id()?, payload.reason)
        .await?;
    Ok(Json(order))
}

/// Move an order along its lifecycle (restaurant owner)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<Order>> {
    require_owner(&user)?;
    let service = state.order_service();
    let order = service
        .update_order_status(&id, &user.record_id()?, payload.new_status, payload.notes)
        .await?;
    Ok(Json(order))
}

fn require_customer(user: &CurrentUser) -> AppResult<()> {
    if !user.is_customer() {
        return Err(AppError::with_message(
            ErrorCode::RoleRequired,
            "Customer role required",
        ));
    }
    Ok(())
}

fn require_owner(user: &CurrentUser) -> AppResult<()> {
    if !user.is_restaurant_owner() {
        return Err(AppError::with_message(
            ErrorCode::RoleRequired,
            "Restaurant owner role required",
        ));
    }
    Ok(())
}
