//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
///   - GET /                  - Greeting
///   - GET /health            - Health provider passthrough
///   - GET /pay?amount=N      - Initiate checkout, 302 to the pay page
///   - GET {redirect_path}/{id} - Payer landing after checkout
///     (`/redirect-url` unless the merchant profile overrides it)
pub fn create_router(state: AppState) -> Router {
    let redirect_route = state.requests.profile().redirect_route();
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::hello))
        .route("/health", get(handlers::health))
        .route("/pay", get(handlers::pay))
        .route(&redirect_route, get(handlers::redirect_landing))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // State
        .with_state(state)
}
