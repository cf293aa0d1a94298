use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Chat API request format
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

// Chat API response format
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResult {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<Panel>,
}

// Dashboard section a chat answer belongs to
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Trends,
    Historical,
    Global,
    Ohlc,
    Compare,
    Help,
}

// Chart ranges the dashboard understands, serialized as a day count
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeRange {
    #[serde(rename = "1")]
    Day,
    #[serde(rename = "7")]
    Week,
    #[serde(rename = "30")]
    Month,
    #[serde(rename = "90")]
    Quarter,
    #[serde(rename = "365")]
    Year,
}

impl TimeRange {
    pub fn as_days(&self) -> &'static str {
        match self {
            TimeRange::Day => "1",
            TimeRange::Week => "7",
            TimeRange::Month => "30",
            TimeRange::Quarter => "90",
            TimeRange::Year => "365",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Day => "24 hours",
            TimeRange::Week => "7 days",
            TimeRange::Month => "30 days",
            TimeRange::Quarter => "90 days",
            TimeRange::Year => "year",
        }
    }
}

// Row of the provider's coins/markets listing (only the fields we read)
#[derive(Deserialize, Clone, Debug)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

// coins/{id}/market_chart: [timestamp_ms, price] pairs
#[derive(Deserialize, Clone, Debug)]
pub struct MarketChart {
    pub prices: Vec<[f64; 2]>,
}

// global endpoint wraps everything in `data`
#[derive(Deserialize, Clone, Debug)]
pub struct GlobalSnapshot {
    pub data: GlobalData,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GlobalData {
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap_percentage: HashMap<String, f64>,
}
