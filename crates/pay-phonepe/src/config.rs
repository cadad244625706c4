//! # PhonePe Configuration
//!
//! Configuration management for the PhonePe integration.
//! All secrets are loaded from environment variables.

use pay_core::PaymentError;
use std::env;
use std::time::Duration;

/// Path of the pay-page initiation API, relative to the host URL
pub const PAY_ENDPOINT: &str = "/pg/v1/pay";

/// Default outbound timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// PhonePe API configuration
#[derive(Clone)]
pub struct PhonePeConfig {
    /// Host URL (e.g. https://api-preprod.phonepe.com/apis/pg-sandbox)
    pub host_url: String,

    /// Merchant id issued by PhonePe
    pub merchant_id: String,

    /// Salt key used in the X-VERIFY checksum
    pub salt_key: String,

    /// Index of the salt key, appended after `###`
    pub salt_index: String,

    /// Outbound request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for PhonePeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhonePeConfig")
            .field("host_url", &self.host_url)
            .field("merchant_id", &self.merchant_id)
            .field("salt_key", &"[REDACTED]")
            .field("salt_index", &self.salt_index)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn required(name: &str) -> Result<String, PaymentError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(PaymentError::Configuration(format!("{} not set", name))),
    }
}

impl PhonePeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PHONEPE_HOST_URL` (or `PHONEPE_TEST_HOST_URL`)
    /// - `PHONEPE_MERCHANT_ID`
    /// - `PHONEPE_KEY_API_VALUE`
    /// - `PHONEPE_KEY_API_INDEX`
    ///
    /// Optional: `PHONEPE_TIMEOUT_SECS` (default 10)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let host_url = required("PHONEPE_HOST_URL").or_else(|_| {
            required("PHONEPE_TEST_HOST_URL").map_err(|_| {
                PaymentError::Configuration(
                    "PHONEPE_HOST_URL (or PHONEPE_TEST_HOST_URL) not set".to_string(),
                )
            })
        })?;
        let merchant_id = required("PHONEPE_MERCHANT_ID")?;
        let salt_key = required("PHONEPE_KEY_API_VALUE")?;
        let salt_index = required("PHONEPE_KEY_API_INDEX")?;

        if !host_url.starts_with("http://") && !host_url.starts_with("https://") {
            return Err(PaymentError::Configuration(
                "PHONEPE_HOST_URL must start with http:// or https://".to_string(),
            ));
        }

        let timeout_secs = match env::var("PHONEPE_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                PaymentError::Configuration(
                    "PHONEPE_TIMEOUT_SECS must be a positive integer".to_string(),
                )
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(host_url, merchant_id, salt_key, salt_index)
            .with_timeout(Duration::from_secs(timeout_secs)))
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        host_url: impl Into<String>,
        merchant_id: impl Into<String>,
        salt_key: impl Into<String>,
        salt_index: impl Into<String>,
    ) -> Self {
        Self {
            host_url: host_url.into().trim_end_matches('/').to_string(),
            merchant_id: merchant_id.into(),
            salt_key: salt_key.into(),
            salt_index: salt_index.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builder: set the outbound timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the pay endpoint
    pub fn pay_url(&self) -> String {
        format!("{}{}", self.host_url, PAY_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_url() {
        let config = PhonePeConfig::new(
            "https://api-preprod.phonepe.com/apis/pg-sandbox/",
            "PGTESTPAYUAT",
            "salt",
            "1",
        );
        assert_eq!(
            config.pay_url(),
            "https://api-preprod.phonepe.com/apis/pg-sandbox/pg/v1/pay"
        );
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_debug_redacts_salt_key() {
        let config = PhonePeConfig::new("https://api.phonepe.com/apis/hermes", "M1", "super-secret", "1");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_env_missing_key() {
        // Clear any existing env vars
        env::remove_var("PHONEPE_HOST_URL");
        env::remove_var("PHONEPE_TEST_HOST_URL");

        let result = PhonePeConfig::from_env();
        assert!(matches!(result, Err(PaymentError::Configuration(_))));
    }
}
