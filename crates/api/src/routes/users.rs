use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/user/register", post(handlers::users::register_user))
        .route("/api/user/login", post(handlers::users::login_user))
}
