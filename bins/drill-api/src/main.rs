mod config;
mod handlers;
mod judge;
mod routes;

use config::Config;
use drill_common::config::BIND_ADDR;
use judge::JudgeClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub judge: JudgeClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .with_target(false)
        .init();

    info!("Drill API booting...");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Set {} to the judge service API key", config::API_KEY_VAR);
        e
    })?;

    let judge = JudgeClient::new(config);
    info!(
        judge_url = %judge.config().judge_url,
        judge_host = %judge.config().judge_host,
        "Judge configured"
    );

    let state = Arc::new(AppState { judge });
    let app = routes::app(state);

    let listener = TcpListener::bind(BIND_ADDR).await?;
    info!("HTTP server listening on {}", BIND_ADDR);
    info!("Ready to accept submissions");

    axum::serve(listener, app).await?;

    Ok(())
}
