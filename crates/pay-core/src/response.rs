//! # Payment Initiation Response
//!
//! The gateway's JSON envelope and the redirect resolution rules. The
//! checkout URL is only ever taken from an envelope whose `success` flag
//! is true.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Redirect target inside the instrument response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectInfo {
    pub url: String,
    #[serde(default)]
    pub method: String,
}

/// Instrument-specific part of a successful initiation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentResponse {
    #[serde(rename = "type", default)]
    pub instrument_type: String,
    #[serde(default)]
    pub redirect_info: Option<RedirectInfo>,
}

/// `data` block of the envelope. Declines may send it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiationData {
    #[serde(default)]
    pub merchant_id: String,
    #[serde(default)]
    pub merchant_transaction_id: String,
    #[serde(default)]
    pub instrument_response: Option<InstrumentResponse>,
}

/// Gateway response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInitiationResponse {
    pub success: bool,
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<PaymentInitiationData>,
}

/// Where to send the payer's browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub merchant_transaction_id: String,
    pub url: String,
    pub method: String,
}

impl PaymentInitiationResponse {
    /// Parse a raw gateway body
    pub fn from_slice(body: &[u8]) -> PaymentResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| PaymentError::MalformedGatewayResponse(e.to_string()))
    }

    fn redirect_info(&self) -> Option<&RedirectInfo> {
        self.data
            .as_ref()
            .and_then(|d| d.instrument_response.as_ref())
            .and_then(|ir| ir.redirect_info.as_ref())
    }

    /// Extract the hosted-checkout URL.
    ///
    /// A declined envelope, or an accepted one without a URL, is
    /// `PaymentInitiationRejected`. A URL that is not absolute http(s) is
    /// `MalformedGatewayResponse`.
    pub fn resolve_redirect(&self) -> PaymentResult<CheckoutRedirect> {
        let rejected = || PaymentError::PaymentInitiationRejected {
            code: self.code.clone(),
            message: self.message.clone(),
        };

        if !self.success {
            return Err(rejected());
        }

        let info = self
            .redirect_info()
            .filter(|info| !info.url.trim().is_empty())
            .ok_or_else(rejected)?;

        let parsed = Url::parse(&info.url).map_err(|e| {
            PaymentError::MalformedGatewayResponse(format!("redirect url '{}': {}", info.url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PaymentError::MalformedGatewayResponse(format!(
                "redirect url '{}' is not http(s)",
                info.url
            )));
        }

        Ok(CheckoutRedirect {
            merchant_transaction_id: self
                .data
                .as_ref()
                .map(|d| d.merchant_transaction_id.clone())
                .unwrap_or_default(),
            url: info.url.clone(),
            method: info.method.clone(),
        })
    }
}
