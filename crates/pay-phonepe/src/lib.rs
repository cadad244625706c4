//! # pay-phonepe
//!
//! PhonePe pay-page integration for phonepe-pay-rs.
//!
//! Every initiation is:
//!
//! 1. serialized to canonical JSON and base64-encoded
//! 2. signed: `sha256(base64 + "/pg/v1/pay" + salt_key) + "###" + salt_index`
//! 3. POSTed as `{"request": "<base64>"}` with an `X-VERIFY` header
//! 4. parsed into a `PaymentInitiationResponse`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_phonepe::PhonePeClient;
//! use pay_core::PaymentGateway;
//!
//! // Create client from environment
//! let client = PhonePeClient::from_env()?;
//!
//! let redirect = client.checkout(&request).await?;
//! // 302 the browser to redirect.url
//! ```

pub mod checksum;
pub mod client;
pub mod config;
pub mod transport;

// Re-exports
pub use checksum::{decode_payload, encode_payload, sign, CHECKSUM_SEPARATOR};
pub use client::{PayEnvelope, PhonePeClient};
pub use config::{PhonePeConfig, DEFAULT_TIMEOUT_SECS, PAY_ENDPOINT};
pub use transport::{HttpTransport, RawResponse, ReqwestTransport, SignedRequest, X_VERIFY};
