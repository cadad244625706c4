//! # Merchant Profile
//!
//! Static merchant-side details stamped onto every payment initiation.
//! Loaded from `config/merchant.toml` when present.

use crate::error::{PaymentError, PaymentResult};
use crate::request::RedirectMode;
use serde::{Deserialize, Serialize};

/// Per-deployment payer defaults and URL layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantProfile {
    /// Merchant-side user id sent when the caller does not supply one
    #[serde(default = "default_user_id")]
    pub merchant_user_id: String,

    /// Payer mobile number sent when the caller does not supply one
    #[serde(default = "default_mobile_number")]
    pub mobile_number: String,

    /// How the gateway returns the payer to `redirect_url`
    #[serde(default)]
    pub redirect_mode: RedirectMode,

    /// Path the payer lands on after checkout; the transaction id is appended
    #[serde(default = "default_redirect_path")]
    pub redirect_path: String,

    /// Path the gateway calls server-to-server with the final status
    #[serde(default = "default_callback_path")]
    pub callback_path: String,
}

fn default_user_id() -> String {
    "123242".to_string()
}

fn default_mobile_number() -> String {
    "9999999999".to_string()
}

fn default_redirect_path() -> String {
    "/redirect-url".to_string()
}

fn default_callback_path() -> String {
    "/callback-url".to_string()
}

impl Default for MerchantProfile {
    fn default() -> Self {
        Self {
            merchant_user_id: default_user_id(),
            mobile_number: default_mobile_number(),
            redirect_mode: RedirectMode::default(),
            redirect_path: default_redirect_path(),
            callback_path: default_callback_path(),
        }
    }
}

impl MerchantProfile {
    /// Parse a profile from TOML, validating the payer defaults
    pub fn from_toml_str(content: &str) -> PaymentResult<Self> {
        let profile: MerchantProfile = toml::from_str(content)
            .map_err(|e| PaymentError::Configuration(format!("invalid merchant profile: {}", e)))?;

        validate_user_id(&profile.merchant_user_id)
            .and_then(|_| validate_mobile_number(&profile.mobile_number))
            .map_err(|e| PaymentError::Configuration(e.to_string()))?;
        validate_route_path("redirect_path", &profile.redirect_path)?;
        validate_route_path("callback_path", &profile.callback_path)?;

        Ok(profile)
    }

    /// Route pattern serving the payer's return page
    pub fn redirect_route(&self) -> String {
        format!("{}/{{merchant_transaction_id}}", self.redirect_path)
    }

    /// URL the payer is returned to for a given transaction
    pub fn redirect_url(&self, base_url: &str, merchant_transaction_id: &str) -> String {
        format!(
            "{}{}/{}",
            base_url.trim_end_matches('/'),
            self.redirect_path,
            merchant_transaction_id
        )
    }

    /// Server-to-server callback URL
    pub fn callback_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.callback_path)
    }
}

/// A mountable static path: leading `/`, at least one segment, no trailing
/// `/`, only `[A-Za-z0-9/_.-]`
fn validate_route_path(field: &str, path: &str) -> PaymentResult<()> {
    let valid = path.len() > 1
        && path.starts_with('/')
        && !path.ends_with('/')
        && !path.contains("//")
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(PaymentError::Configuration(format!(
            "{} '{}' must look like /segment[/segment...]",
            field, path
        )))
    }
}

/// Accepts 1-36 characters of `[A-Za-z0-9_-]`
pub fn validate_user_id(user_id: &str) -> PaymentResult<()> {
    let valid = !user_id.is_empty()
        && user_id.len() <= 36
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(PaymentError::InvalidRequest(format!(
            "userId '{}' must be 1-36 characters of letters, digits, '_' or '-'",
            user_id
        )))
    }
}

/// Accepts exactly ten ASCII digits
pub fn validate_mobile_number(mobile_number: &str) -> PaymentResult<()> {
    if mobile_number.len() == 10 && mobile_number.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PaymentError::InvalidRequest(format!(
            "mobileNumber '{}' must be exactly 10 digits",
            mobile_number
        )))
    }
}
