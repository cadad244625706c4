//! # pay-api
//!
//! HTTP API layer for phonepe-pay-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Hosted-checkout initiation with a 302 to the PhonePe pay page
//! - Health passthrough to an injected provider
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Greeting |
//! | GET | `/health` | Health check |
//! | GET | `/pay?amount=30` | Initiate checkout, 302 to pay page |
//! | GET | `/redirect-url/{id}` | Payer landing after checkout |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
