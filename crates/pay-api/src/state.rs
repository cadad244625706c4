//! # Application State
//!
//! Shared state for the Axum application.
//! Everything is built once at startup and injected; handlers never read
//! the environment.

use pay_core::{
    BoxedPaymentGateway, HealthProvider, MerchantProfile, PaymentRequestBuilder, StaticHealth,
};
use pay_phonepe::PhonePeClient;
use std::sync::Arc;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public base URL used for redirect and callback URLs
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_format: match std::env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Gateway used by `/pay`
    pub gateway: BoxedPaymentGateway,
    /// Provider behind `/health`
    pub health: Arc<dyn HealthProvider>,
    /// Builds initiation payloads for the configured merchant
    pub requests: PaymentRequestBuilder,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create an AppState backed by the real PhonePe gateway
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let profile = load_merchant_profile()?;

        let client = PhonePeClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize PhonePe: {}", e))?;

        let merchant_id = client.config().merchant_id.clone();
        let health = StaticHealth::new("phonepe-pay", env!("CARGO_PKG_VERSION"))
            .with_entry("gateway", client.config().host_url.clone())
            .with_entry("environment", config.environment.clone());

        Ok(Self::from_parts(
            config,
            merchant_id,
            profile,
            Arc::new(client),
            Arc::new(health),
        ))
    }

    /// Assemble state from explicit collaborators
    pub fn from_parts(
        config: AppConfig,
        merchant_id: impl Into<String>,
        profile: MerchantProfile,
        gateway: BoxedPaymentGateway,
        health: Arc<dyn HealthProvider>,
    ) -> Self {
        let requests = PaymentRequestBuilder::new(merchant_id, config.base_url.clone(), profile);

        Self {
            gateway,
            health,
            requests,
            config,
        }
    }
}

/// Load the merchant profile from config file
fn load_merchant_profile() -> anyhow::Result<MerchantProfile> {
    let config_paths = [
        "config/merchant.toml",
        "../config/merchant.toml",
        "../../config/merchant.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let profile = MerchantProfile::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded merchant profile from {}", path);
            return Ok(profile);
        }
    }

    tracing::warn!("No merchant profile found, using defaults");
    Ok(MerchantProfile::default())
}
