//! # Payment Error Types
//!
//! Typed error handling for the phonepe-pay hosted checkout flow.
//! All payment operations return `Result<T, PaymentError>`.
//!
//! Every error is terminal for the request that raised it. Nothing here
//! is retried and nothing is fatal to the process.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The caller's amount could not be parsed as a non-negative integer
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Optional caller input (user id, mobile number) failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request payload could not be serialized or encoded
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// Transport failure reaching the gateway (refused, DNS, timeout)
    #[error("Gateway unreachable: {message}")]
    GatewayUnreachable { message: String, timed_out: bool },

    /// Gateway answered with a body we could not interpret
    #[error("Malformed gateway response: {0}")]
    MalformedGatewayResponse(String),

    /// Gateway explicitly declined the initiation
    #[error("Payment initiation rejected [{code}]: {message}")]
    PaymentInitiationRejected { code: String, message: String },

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidAmount(_) => 400,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::Configuration(_) => 500,
            PaymentError::EncodingError(_) => 500,
            PaymentError::GatewayUnreachable { timed_out: true, .. } => 504,
            PaymentError::GatewayUnreachable { .. } => 502,
            PaymentError::MalformedGatewayResponse(_) => 502,
            PaymentError::PaymentInitiationRejected { .. } => 402,
            PaymentError::Internal(_) => 500,
        }
    }

    /// Gateway-reported code, if the gateway produced this error
    pub fn gateway_code(&self) -> Option<&str> {
        match self {
            PaymentError::PaymentInitiationRejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::EncodingError(err.to_string())
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
