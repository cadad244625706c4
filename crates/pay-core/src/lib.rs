//! # pay-core
//!
//! Core types and traits for the phonepe-pay hosted checkout service.
//!
//! This crate provides:
//! - `Subunits` for integer-safe rupee/paise amounts
//! - `PaymentInitiationRequest` and `PaymentRequestBuilder` for the pay-page payload
//! - `PaymentInitiationResponse` and redirect resolution
//! - `MerchantProfile` for static merchant-side details
//! - `PaymentGateway` and `HealthProvider` capability traits
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{MerchantProfile, PayerDetails, PaymentGateway, PaymentRequestBuilder};
//!
//! let builder = PaymentRequestBuilder::new("MERCHANTUAT", "https://shop.in", MerchantProfile::default());
//! let request = builder.build_from_major("30", &PayerDetails::default())?;
//!
//! let redirect = gateway.checkout(&request).await?;
//! // 302 the browser to redirect.url
//! ```

pub mod amount;
pub mod error;
pub mod gateway;
pub mod health;
pub mod merchant;
pub mod request;
pub mod response;

// Re-exports for convenience
pub use amount::{Subunits, MAX_MAJOR_AMOUNT, SUBUNITS_PER_MAJOR};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use health::{HealthProvider, HealthReport, StaticHealth};
pub use merchant::{validate_mobile_number, validate_user_id, MerchantProfile};
pub use request::{
    InstrumentType, PayerDetails, PaymentInitiationRequest, PaymentInstrument,
    PaymentRequestBuilder, RedirectMode,
};
pub use response::{
    CheckoutRedirect, InstrumentResponse, PaymentInitiationData, PaymentInitiationResponse,
    RedirectInfo,
};
