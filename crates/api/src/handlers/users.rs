use axum::{extract::State, http::StatusCode, Json};
use slotbook_core::{
    errors::BookingError,
    models::user::{
        normalize_email, LoginRequest, LoginResponse, RegisterUserRequest, RegisterUserResponse,
        User,
    },
};
use slotbook_db::repositories::user as user_repo;
use std::sync::Arc;
use tracing::info;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn register_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterUserResponse>), AppError> {
    let user = payload.validate()?;

    let created = user_repo::create_user(&state.db_pool, &user)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::Conflict(format!("A user with email {} already exists", user.email))
        })?;

    info!("User registered: id={}", created.id);

    let response = RegisterUserResponse {
        success: true,
        message: "Registration successful!".to_string(),
        user_id: created.id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Looks a user up by email. There are no credentials: knowing the email is
/// enough.
#[axum::debug_handler]
pub async fn login_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = normalize_email(&payload.email)?;

    let user = user_repo::get_user_by_email(&state.db_pool, &email)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound("User not found".to_string()))?;

    let response = LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user: User::from(user),
    };

    Ok(Json(response))
}
