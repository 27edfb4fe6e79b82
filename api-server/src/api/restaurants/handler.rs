//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Dish, Restaurant};
use crate::db::repository::{DishRepository, RestaurantRepository};
use crate::orders::money::MAX_PRICE;
use crate::utils::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_required_text};
use shared::models::restaurant::{CreateDishRequest, CreateRestaurantRequest};
use shared::{AppError, AppResult, ErrorCode};

/// List all active restaurants (customer browse path)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurants = repo.find_all_active().await?;
    Ok(Json(restaurants))
}

/// List the caller's own restaurants
pub async fn list_own(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Restaurant>>> {
    require_owner(&user)?;
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurants = repo.find_by_owner(&user.record_id()?).await?;
    Ok(Json(restaurants))
}

/// Get restaurant by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::RestaurantNotFound, format!("Restaurant {} not found", id)))?;
    Ok(Json(restaurant))
}

/// List a restaurant's menu
pub async fn list_dishes(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Dish>>> {
    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::RestaurantNotFound, format!("Restaurant {} not found", id)))?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant record is missing its id"))?;

    let dishes = DishRepository::new(state.db.clone())
        .find_by_restaurant(&restaurant_id)
        .await?;
    Ok(Json(dishes))
}

/// Create a restaurant (restaurant owners)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateRestaurantRequest>,
) -> AppResult<Json<Restaurant>> {
    require_owner(&user)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.city, "city", MAX_NAME_LEN)?;
    if payload.opening_hours.len() != 7 {
        return Err(AppError::validation(
            "opening_hours must have exactly 7 entries (Monday first)",
        ));
    }

    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo
        .create(
            user.record_id()?,
            payload.name.trim().to_string(),
            payload.opening_hours,
            payload.address,
            payload.city,
            payload.phone,
        )
        .await?;

    tracing::info!(restaurant = ?restaurant.id, owner = %user.id, "Restaurant created");
    Ok(Json(restaurant))
}

/// Add a dish to a restaurant's menu (its owner only)
pub async fn create_dish(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateDishRequest>,
) -> AppResult<Json<Dish>> {
    require_owner(&user)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if !payload.price.is_finite() || payload.price <= 0.0 || payload.price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "price must be a positive number up to {MAX_PRICE}, got {}",
            payload.price
        )));
    }
    if !(1..=480).contains(&payload.cooking_time_minutes) {
        return Err(AppError::validation(format!(
            "cooking_time_minutes must be between 1 and 480, got {}",
            payload.cooking_time_minutes
        )));
    }

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::RestaurantNotFound, format!("Restaurant {} not found", id)))?;
    if restaurant.owner != user.record_id()? {
        return Err(AppError::permission_denied("Not the owner of this restaurant"));
    }
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant record is missing its id"))?;

    let dish = DishRepository::new(state.db.clone())
        .create(
            restaurant_id,
            payload.name.trim().to_string(),
            payload.price,
            payload.cooking_time_minutes,
            payload.description,
        )
        .await?;
    Ok(Json(dish))
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
