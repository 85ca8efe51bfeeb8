//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a JSON body of the form
//! `{"success": false, "message": "..."}` so every endpoint fails the same way.
//!
//! Store and internal failures are reported as 500 and logged at error level;
//! they are never folded into an "available" or "no slots" answer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::{errors::BookingError, models::interval::InvalidIntervalError};
use tracing::{error, warn};

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::errors::BookingError;
///
/// async fn handler(email: String) -> Result<Json<String>, AppError> {
///     if !email.contains('@') {
///         return Err(AppError(BookingError::Validation("Invalid email".to_string())));
///     }
///     Ok(Json(email))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::InvalidInterval(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        } else {
            warn!("Request rejected ({}): {}", status, message);
        }

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

/// Allows `?` on functions returning `BookingResult<T>` inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

impl From<InvalidIntervalError> for AppError {
    fn from(err: InvalidIntervalError) -> Self {
        AppError(BookingError::InvalidInterval(err))
    }
}

/// Repository failures arrive as `eyre::Report` and are treated as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// Maps a BookingError straight to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
