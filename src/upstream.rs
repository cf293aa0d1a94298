use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::UpstreamError;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const API_KEY_PARAM: &str = "x_cg_demo_api_key";

/// Thin GET client for the market data provider.
///
/// One attempt per call; the provider's status codes are folded into
/// [`UpstreamError`] kinds.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl UpstreamClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: &str, params: &BTreeMap<String, String>) -> Result<Url, UpstreamError> {
        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        if let Some(key) = &self.api_key {
            query.push((API_KEY_PARAM, key.as_str()));
        }

        let raw = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| UpstreamError::upstream(format!("Invalid upstream URL: {}", e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub async fn request(
        &self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Value, UpstreamError> {
        let url = self.url_for(endpoint, params)?;
        tracing::debug!(endpoint, ?params, "calling market data provider");

        let res = self.client.get(url).send().await.map_err(|e| {
            let err = translate_transport(&e);
            tracing::warn!(endpoint, error = %e, "market data request failed");
            err
        })?;

        let status = res.status();
        if status.is_success() {
            return res.json::<Value>().await.map_err(|e| {
                tracing::warn!(endpoint, error = %e, "could not decode market data response");
                translate_transport(&e)
            });
        }

        let body = res.text().await.unwrap_or_default();
        tracing::warn!(endpoint, %status, "market data provider returned an error");
        Err(translate_status(status, &body))
    }
}

fn translate_transport(err: &reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::upstream(format!("Market data request failed: {}", err))
    }
}

fn translate_status(status: StatusCode, body: &str) -> UpstreamError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited,
        StatusCode::UNAUTHORIZED => UpstreamError::Unauthorized,
        _ => UpstreamError::Upstream {
            message: provider_message(body),
        },
    }
}

// Pull a human readable message out of the provider's error body
fn provider_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let candidates = [
        json.get("error").and_then(Value::as_str),
        json.pointer("/error/message").and_then(Value::as_str),
        json.pointer("/status/error_message").and_then(Value::as_str),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|m| !m.trim().is_empty())
        .map(str::to_string)
}
