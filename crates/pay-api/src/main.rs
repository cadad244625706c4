//! # PhonePe Pay
//!
//! Hosted-checkout initiation service for the PhonePe pay page.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PHONEPE_HOST_URL=https://api-preprod.phonepe.com/apis/pg-sandbox
//! export PHONEPE_MERCHANT_ID=PGTESTPAYUAT
//! export PHONEPE_KEY_API_VALUE=...
//! export PHONEPE_KEY_API_INDEX=1
//!
//! # Run the server
//! phonepe-pay
//! ```

use pay_api::{routes, state::AppState, AppConfig, LogFormat};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_tracing(AppConfig::from_env().log_format);

    // Initialize application state; missing gateway credentials stop us here
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("PhonePe Pay starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: GET http://{}/pay?amount=30", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
