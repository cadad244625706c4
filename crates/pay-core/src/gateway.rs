//! # Payment Gateway Trait
//!
//! Seam between the HTTP surface and a concrete gateway integration.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          PaymentGateway (trait)              │
//! │  ├── initiate()                              │
//! │  └── provider_name()                         │
//! └──────────────────────────────────────────────┘
//!                       ▲
//!              ┌────────┴────────┐
//!              │  PhonePeClient  │
//!              └─────────────────┘
//! ```

use crate::error::PaymentResult;
use crate::request::PaymentInitiationRequest;
use crate::response::{CheckoutRedirect, PaymentInitiationResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// A hosted-checkout gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Sign and send one initiation request, returning the parsed envelope.
    ///
    /// Single attempt; no retries.
    async fn initiate(
        &self,
        request: &PaymentInitiationRequest,
    ) -> PaymentResult<PaymentInitiationResponse>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;

    /// Initiate and resolve the checkout redirect in one step.
    async fn checkout(&self, request: &PaymentInitiationRequest) -> PaymentResult<CheckoutRedirect> {
        self.initiate(request).await?.resolve_redirect()
    }
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
