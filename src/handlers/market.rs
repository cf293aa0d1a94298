use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ApiError, UpstreamError};
use crate::state::AppState;

const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 250;
const DEFAULT_DAYS: &str = "30";

#[derive(Deserialize, Debug, Default)]
pub struct TrendsQuery {
    vs_currency: Option<String>,
    per_page: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RangeQuery {
    days: Option<String>,
    vs_currency: Option<String>,
}

// coin ids and query values end up in the upstream path, keep them plain
fn plain(field: &str, value: &str) -> Result<(), ApiError> {
    let ok = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("Invalid {}: {:?}", field, value)))
    }
}

fn vs_currency(value: Option<String>) -> Result<String, ApiError> {
    let vs = value.unwrap_or_else(|| "usd".to_string()).to_lowercase();
    plain("vs_currency", &vs)?;
    Ok(vs)
}

fn days(value: Option<String>) -> Result<String, ApiError> {
    let days = value.unwrap_or_else(|| DEFAULT_DAYS.to_string());
    plain("days", &days)?;
    Ok(days)
}

// GET /api/trends?vs_currency=usd&per_page=10
pub async fn trends_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TrendsQuery>,
) -> Result<Json<Value>, ApiError> {
    let vs = vs_currency(q.vs_currency)?;
    let per_page = q.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    Ok(Json(state.market.top_markets(&vs, per_page).await?))
}

// GET /api/historical/{coin_id}?days=30
pub async fn historical_handler(
    State(state): State<Arc<AppState>>,
    Path(coin_id): Path<String>,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Value>, ApiError> {
    plain("coin id", &coin_id)?;
    let days = days(q.days)?;
    let mut chart = state.market.price_history(&coin_id, &days).await?;
    let prices = chart
        .get_mut("prices")
        .map(Value::take)
        .ok_or_else(|| UpstreamError::upstream("Price history response has no prices"))?;
    Ok(Json(prices))
}

// GET /api/global
pub async fn global_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let mut snapshot = state.market.global().await?;
    let data = snapshot
        .get_mut("data")
        .map(Value::take)
        .ok_or_else(|| UpstreamError::upstream("Global response has no data"))?;
    Ok(Json(data))
}

// GET /api/coin/{coin_id}/ohlc?days=30&vs_currency=usd
pub async fn ohlc_handler(
    State(state): State<Arc<AppState>>,
    Path(coin_id): Path<String>,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Value>, ApiError> {
    plain("coin id", &coin_id)?;
    let days = days(q.days)?;
    let vs = vs_currency(q.vs_currency)?;
    Ok(Json(state.market.ohlc(&coin_id, &days, &vs).await?))
}
