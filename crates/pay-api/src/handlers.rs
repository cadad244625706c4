//! # Request Handlers
//!
//! Axum request handlers for the payment API.

use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{PayerDetails, PaymentError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Greeting returned by `/`
pub const HELLO_MESSAGE: &str = "Hello World from PhonePe!";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query string accepted by `/pay`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayQuery {
    /// Amount in whole rupees
    #[serde(default)]
    pub amount: Option<String>,
    /// Overrides the profile's merchant user id
    #[serde(default)]
    pub user_id: Option<String>,
    /// Overrides the profile's mobile number
    #[serde(default)]
    pub mobile_number: Option<String>,
}

/// Body of `/`
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
            gateway_code: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_gateway_code(mut self, gateway_code: impl Into<String>) -> Self {
        self.gateway_code = Some(gateway_code.into());
        self
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let mut response = ErrorResponse::new(err.to_string(), code);
    if let PaymentError::PaymentInitiationRejected { code, message } = &err {
        response = response.with_gateway_code(code.clone()).with_details(message.clone());
    }
    (StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), Json(response))
}

// =============================================================================
// Handlers
// =============================================================================

/// Static greeting
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: HELLO_MESSAGE,
    })
}

/// Health check endpoint; passes the provider's map through unmodified
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.health.health().await)
}

/// Initiate a pay-page checkout and 302 the browser to it
#[instrument(skip_all)]
pub async fn pay(
    State(state): State<AppState>,
    query: Result<Query<PayQuery>, QueryRejection>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let Query(query) = query.map_err(|rejection| {
        info!("Rejected pay query: {}", rejection.body_text());
        payment_error_to_response(PaymentError::InvalidRequest(rejection.body_text()))
    })?;

    let payer = PayerDetails {
        user_id: query.user_id,
        mobile_number: query.mobile_number,
    };

    let request = state
        .requests
        .build_from_major(query.amount.as_deref().unwrap_or(""), &payer)
        .map_err(|e| {
            info!("Rejected pay request: {}", e);
            payment_error_to_response(e)
        })?;

    info!(
        "Initiating {} checkout: txn={}, amount={}",
        state.gateway.provider_name(),
        request.merchant_transaction_id,
        request.amount.display()
    );

    let redirect = state.gateway.checkout(&request).await.map_err(|e| {
        error!(
            "Failed to initiate checkout {}: {}",
            request.merchant_transaction_id, e
        );
        payment_error_to_response(e)
    })?;

    info!(
        "Redirecting txn={} to hosted checkout",
        request.merchant_transaction_id
    );

    Ok((StatusCode::FOUND, [(header::LOCATION, redirect.url)]).into_response())
}

/// Landing page the gateway returns the payer to
pub async fn redirect_landing(Path(merchant_transaction_id): Path<String>) -> String {
    format!("Merchant Transaction ID: {}", merchant_transaction_id)
}
