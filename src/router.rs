use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    chat_handler, global_handler, health_handler, historical_handler, metrics_handler, ohlc_handler,
    trends_handler,
};
use crate::middleware::{log_errors, panic_response};
use crate::rate_limit;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    // everything under /api goes through the rate limiter first
    let api = Router::new()
        .route("/chat", post(chat_handler))
        .route("/trends", get(trends_handler))
        .route("/historical/{coin_id}", get(historical_handler))
        .route("/global", get(global_handler))
        .route("/coin/{coin_id}/ohlc", get(ohlc_handler))
        .route_layer(from_fn_with_state(state.clone(), rate_limit::enforce));

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .nest("/api", api)
        .layer(CatchPanicLayer::custom(panic_response(state.dev_mode)))
        .layer(from_fn(log_errors))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
