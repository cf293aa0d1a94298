use serde_json::Value;
use std::collections::BTreeMap;

use crate::cache::{ResponseCache, make_cache_key};
use crate::error::UpstreamError;
use crate::metrics::{CACHE_HITS, CACHE_MISSES, CACHE_SIZE, UPSTREAM_ERRORS};
use crate::upstream::UpstreamClient;

/// Market data calls routed through the response cache.
pub struct MarketService {
    client: UpstreamClient,
    cache: ResponseCache,
}

fn params<const N: usize>(pairs: [(&str, &str); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl MarketService {
    pub fn new(client: UpstreamClient, cache: ResponseCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn client(&self) -> &UpstreamClient {
        &self.client
    }

    // check cache first, only successful payloads are stored
    pub async fn fetch(
        &self,
        endpoint: &str,
        params: BTreeMap<String, String>,
    ) -> Result<Value, UpstreamError> {
        let cache_key = make_cache_key(endpoint, &params);

        if let Some(payload) = self.cache.get(&cache_key) {
            CACHE_HITS.inc();
            tracing::debug!(endpoint, "cache hit");
            return Ok(payload);
        }
        CACHE_MISSES.inc();
        tracing::debug!(endpoint, "cache miss - calling provider");

        match self.client.request(endpoint, &params).await {
            Ok(payload) => {
                self.cache.put(cache_key, payload.clone());
                CACHE_SIZE.set(self.cache.len() as f64);
                Ok(payload)
            }
            Err(e) => {
                UPSTREAM_ERRORS.inc();
                Err(e)
            }
        }
    }

    pub async fn top_markets(&self, vs_currency: &str, per_page: u32) -> Result<Value, UpstreamError> {
        let per_page = per_page.to_string();
        self.fetch(
            "coins/markets",
            params([
                ("vs_currency", vs_currency),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
            ]),
        )
        .await
    }

    pub async fn price_history(&self, coin_id: &str, days: &str) -> Result<Value, UpstreamError> {
        self.fetch(
            &format!("coins/{}/market_chart", coin_id),
            params([("vs_currency", "usd"), ("days", days)]),
        )
        .await
    }

    pub async fn global(&self) -> Result<Value, UpstreamError> {
        self.fetch("global", BTreeMap::new()).await
    }

    pub async fn ohlc(&self, coin_id: &str, days: &str, vs_currency: &str) -> Result<Value, UpstreamError> {
        self.fetch(
            &format!("coins/{}/ohlc", coin_id),
            params([("vs_currency", vs_currency), ("days", days)]),
        )
        .await
    }
}
