use clap::Parser; // for cli
use coinchat_gateway::{AppState, build_router, config::Args, server::bind};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// this is main async function with tokio
#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // parse cli arguments
    let args = Args::parse();

    // creating shared state
    let state = match AppState::from_args(&args) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to build upstream client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if !state.market.client().has_api_key() {
        tracing::warn!("COINGECKO_API_KEY is not set, upstream calls are unauthenticated");
    }

    let app = build_router(state.clone());

    let listener = match bind(&args.host, args.port, args.port_fallback).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}:{}: {}", args.host, args.port, e);
            return ExitCode::FAILURE;
        }
    };
    let local_addr = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| format!("{}:{}", args.host, args.port));

    tracing::info!("Gateway running on http://{}", local_addr);
    tracing::info!("Forwarding to market data API at {}", state.market.client().base_url());
    tracing::info!("Cache TTL: {} seconds", state.market.cache().ttl().as_secs());
    tracing::info!(
        "Rate limit: {} requests per {} seconds",
        args.rate_limit,
        args.rate_window
    );

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await;

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
