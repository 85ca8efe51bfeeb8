//! # Slotbook API
//!
//! The API crate provides the web server for the Slotbook booking service:
//! creating and listing bookings, checking availability, listing a day's
//! slots, and registering and looking up users.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Parse requests, call the core checks and the repositories
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Environment configuration, including business hours
//!
//! Slot and availability math lives in `slotbook-core`; persistence in
//! `slotbook-db`.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error-to-response mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::{Result, WrapErr};
use slotbook_core::models::business_hours::BookingSettings;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use slotbook_api::ApiState;
/// # use slotbook_core::models::business_hours::BookingSettings;
/// # fn example(db_pool: sqlx::PgPool) {
/// let state = Arc::new(ApiState { db_pool, settings: BookingSettings::default() });
/// let app = slotbook_api::app(state);
/// # }
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Business hours, slot length and time zone
    pub settings: BookingSettings,
}

/// Builds the router with every endpoint and request tracing attached.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Booking creation and listing
        .merge(routes::bookings::routes())
        // Candidate interval checks
        .merge(routes::availability::routes())
        // Per-day slot listing
        .merge(routes::slots::routes())
        // Registration and login
        .merge(routes::users::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function sets up logging, attaches CORS and timeout layers, and
/// serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        "Business hours {}:00-{}:00 {} with {} minute slots",
        config.booking.business_hours.start_hour(),
        config.booking.business_hours.end_hour(),
        config.booking.timezone,
        config.booking.slot_duration.minutes()
    );

    let state = Arc::new(ApiState {
        db_pool,
        settings: config.booking,
    });
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}
