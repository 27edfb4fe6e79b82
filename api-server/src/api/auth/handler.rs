//! Auth API Handlers

use axum::{Json, extract::State};

use crate::auth::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{CustomerRepository, RepoError, UserRepository};
use crate::utils::time;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};
use shared::models::UserRole;
use shared::models::user::{LoginRequest, RegisterRequest, TokenResponse};
use shared::{AppError, AppResult, ErrorCode};

/// Register a new account and issue a token
///
/// Customer accounts also get a customer profile holding the delivery
/// address that order creation snapshots from.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    validate_required_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;
    if payload.role == UserRole::Customer && payload.delivery_address.is_none() {
        return Err(AppError::validation(
            "delivery_address is required for customer accounts",
        ));
    }

    let users = UserRepository::new(state.db.clone());
    let password_hash = hash_password(&payload.password)?;
    let user = users
        .create(
            payload.email.trim().to_lowercase(),
            password_hash,
            payload.role,
            payload.display_name.trim().to_string(),
            time::now_rfc3339(),
        )
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => {
                AppError::with_message(ErrorCode::EmailAlreadyRegistered, msg)
            }
            other => other.into(),
        })?;

    let user_id = user
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record is missing its id"))?;

    if let Some(delivery_address) = payload.delivery_address {
        let customers = CustomerRepository::new(state.db.clone());
        customers
            .create(user_id.clone(), delivery_address, payload.phone)
            .await?;
    }

    tracing::info!(user = %user_id, role = %user.role, "Account registered");

    let token = state
        .jwt_service
        .generate_token(user_id.to_string(), user.email.as_str(), user.display_name.as_str(), user.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(Json(TokenResponse {
        token,
        role: user.role,
        display_name: user.display_name,
    }))
}

/// Verify credentials and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let users = UserRepository::new(state.db.clone());
    let user = users
        .find_by_email(&payload.email.trim().to_lowercase())
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        tracing::warn!(email = %user.email, "Login with wrong password");
        return Err(AppError::invalid_credentials());
    }

    let user_id = user
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record is missing its id"))?;

    let token = state
        .jwt_service
        .generate_token(user_id.to_string(), user.email.as_str(), user.display_name.as_str(), user.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(Json(TokenResponse {
        token,
        role: user.role,
        display_name: user.display_name,
    }))
}
