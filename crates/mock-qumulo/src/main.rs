//! `mock-qumulo` — fake appliance for local development.

use mock_qumulo::{router, ApplianceConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ApplianceConfig::from_env();
    for user in &config.users {
        info!(username = %user.name, "account registered");
    }
    if let Some(delay) = config.response_delay {
        info!(delay = ?delay, "responses will be delayed");
    }

    let addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(address = %addr, "mock-qumulo listening");
    axum::serve(listener, router(config)).await?;
    Ok(())
}
