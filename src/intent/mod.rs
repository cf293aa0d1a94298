//! Keyword based chat classification.
//!
//! A message is lowercased, scanned for a coin alias and a time range, then
//! routed to the first matching branch. The branch order is significant: a
//! message hitting several keywords is answered by the earliest branch.

pub mod coins;
pub mod range;
pub mod reply;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::UpstreamError;
use crate::market::MarketService;
use crate::models::{ChatResult, GlobalSnapshot, MarketChart, MarketCoin, Panel, TimeRange};

pub const DEFAULT_COIN: &str = "bitcoin";
pub const DEFAULT_RANGE: TimeRange = TimeRange::Month;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Trends { limit: u32 },
    Historical,
    Global,
    Ohlc,
    Compare,
    Help,
}

/// Picks the branch for an already lowercased message.
///
/// `market` only selects trends when the message mentions neither
/// `market cap` nor `global`, so "global market cap" and also
/// "bitcoin market cap" are answered by the global branch.
pub fn detect_intent(text: &str) -> Intent {
    let has = |keyword: &str| text.contains(keyword);

    if has("trend") || (has("market") && !has("market cap") && !has("global")) {
        let limit = if has("top 10") { 10 } else { 5 };
        Intent::Trends { limit }
    } else if has("historical") || has("price history") || has("trend") {
        // "trend" is also listed here but the branch above always takes it
        Intent::Historical
    } else if has("global") || has("market cap") {
        Intent::Global
    } else if has("ohlc") || has("candlestick") {
        Intent::Ohlc
    } else if has("compare") {
        Intent::Compare
    } else {
        Intent::Help
    }
}

/// A chat answer that failed upstream; still carries the resolved hints.
#[derive(Debug)]
pub struct ChatFailure {
    pub result: ChatResult,
    pub error: UpstreamError,
}

impl IntoResponse for ChatFailure {
    fn into_response(self) -> Response {
        (self.error.status(), Json(self.result)).into_response()
    }
}

pub struct IntentRouter<'a> {
    market: &'a MarketService,
}

impl<'a> IntentRouter<'a> {
    pub fn new(market: &'a MarketService) -> Self {
        Self { market }
    }

    pub async fn classify(&self, message: &str) -> Result<ChatResult, ChatFailure> {
        let text = message.to_lowercase();
        let mut result = ChatResult {
            coin_id: coins::find_coin(&text).map(|c| c.id.to_string()),
            days: range::detect_range(&text),
            ..Default::default()
        };

        let intent = detect_intent(&text);
        tracing::debug!(?intent, coin = ?result.coin_id, days = ?result.days, "classified chat message");

        match self.answer(intent, &text, &mut result).await {
            Ok(body) => {
                result.response = reply::with_disclaimer(&body);
                Ok(result)
            }
            Err(error) => {
                tracing::warn!(?intent, kind = error.kind(), "chat answer failed: {}", error);
                result.response = reply::with_disclaimer(&error.user_message());
                Err(ChatFailure { result, error })
            }
        }
    }

    async fn answer(
        &self,
        intent: Intent,
        text: &str,
        result: &mut ChatResult,
    ) -> Result<String, UpstreamError> {
        match intent {
            Intent::Trends { limit } => {
                result.panel = Some(Panel::Trends);
                let listing: Vec<MarketCoin> = decode(self.market.top_markets("usd", limit).await?)?;
                Ok(reply::trending(&listing))
            }
            Intent::Historical => {
                result.panel = Some(Panel::Historical);
                let (coin, range) = apply_defaults(result);
                let name = coins::display_name(&coin);
                let chart: MarketChart = decode(self.market.price_history(&coin, range.as_days()).await?)?;
                let (first, last) = match (chart.prices.first(), chart.prices.last()) {
                    (Some(first), Some(last)) => (first[1], last[1]),
                    _ => return Err(no_price_data(&name)),
                };
                Ok(reply::historical(&name, range, first, last))
            }
            Intent::Global => {
                result.panel = Some(Panel::Global);
                let snapshot: GlobalSnapshot = decode(self.market.global().await?)?;
                Ok(reply::global(&snapshot.data))
            }
            Intent::Ohlc => {
                result.panel = Some(Panel::Ohlc);
                let (coin, range) = apply_defaults(result);
                let candles = self.market.ohlc(&coin, range.as_days(), "usd").await?;
                let count = candles.as_array().map_or(0, Vec::len);
                Ok(reply::ohlc(&coins::display_name(&coin), range, count))
            }
            Intent::Compare => {
                let ids = coins::find_all_coins(text);
                let (a, b) = match ids.as_slice() {
                    [a, b, ..] => (*a, *b),
                    _ => return Ok(reply::COMPARE_HINT.to_string()),
                };
                result.panel = Some(Panel::Trends);

                let days = result.days.unwrap_or(TimeRange::Day).as_days();
                let (first, second) = tokio::try_join!(
                    self.market.price_history(a, days),
                    self.market.price_history(b, days)
                )?;
                let first = latest_price(a, first)?;
                let second = latest_price(b, second)?;
                Ok(reply::compare(
                    (&coins::display_name(a), first),
                    (&coins::display_name(b), second),
                ))
            }
            Intent::Help => {
                result.panel = Some(Panel::Help);
                Ok(reply::HELP_TEXT.to_string())
            }
        }
    }
}

fn apply_defaults(result: &mut ChatResult) -> (String, TimeRange) {
    let coin = result
        .coin_id
        .get_or_insert_with(|| DEFAULT_COIN.to_string())
        .clone();
    let range = *result.days.get_or_insert(DEFAULT_RANGE);
    (coin, range)
}

fn latest_price(coin_id: &str, payload: Value) -> Result<f64, UpstreamError> {
    let chart: MarketChart = decode(payload)?;
    chart
        .prices
        .last()
        .map(|sample| sample[1])
        .ok_or_else(|| no_price_data(&coins::display_name(coin_id)))
}

fn no_price_data(name: &str) -> UpstreamError {
    UpstreamError::upstream(format!("No price data available for {}.", name))
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, UpstreamError> {
    serde_json::from_value(payload)
        .map_err(|e| UpstreamError::upstream(format!("Unexpected market data format: {}", e)))
}
