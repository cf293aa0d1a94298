#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{Next, from_fn_with_state},
    response::{IntoResponse, Response},
    routing::get,
};
use coinchat_gateway::{
    AppState, build_router, cache::ResponseCache, market::MarketService, rate_limit::RateLimiter,
    upstream::UpstreamClient,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const API_KEY: &str = "test-key";

#[derive(Default)]
pub struct MockState {
    hits: AtomicUsize,
    forced: Mutex<Option<(StatusCode, Value)>>,
}

/// A fake CoinGecko listening on an ephemeral local port.
pub struct MockUpstream {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Every following call answers with this status and body.
    pub fn fail_with(&self, status: StatusCode, body: Value) {
        *self.state.forced.lock().unwrap() = Some((status, body));
    }

    pub fn client(&self, api_key: Option<&str>, timeout: Duration) -> UpstreamClient {
        UpstreamClient::new(self.base_url.clone(), api_key.map(str::to_string), timeout).unwrap()
    }

    pub fn market(&self) -> MarketService {
        MarketService::new(
            self.client(Some(API_KEY), Duration::from_secs(5)),
            ResponseCache::new(Duration::from_secs(60)),
        )
    }

    pub fn app(&self, rate_limit: u32) -> Router {
        let state = AppState::new(
            self.market(),
            RateLimiter::new(rate_limit, Duration::from_secs(60)),
            false,
        );
        build_router(Arc::new(state))
    }
}

async fn gate(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    if let Some((status, body)) = state.forced.lock().unwrap().clone() {
        return (status, Json(body)).into_response();
    }

    let key = format!("x_cg_demo_api_key={}", API_KEY);
    let authorized = req.uri().query().is_some_and(|q| q.split('&').any(|p| p == key));
    if !authorized {
        let body = json!({"status": {"error_code": 10002, "error_message": "API Key Missing"}});
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }

    next.run(req).await
}

fn coin_fixture() -> Vec<Value> {
    [
        ("bitcoin", "btc", "Bitcoin", 66000.0, 2.5),
        ("ethereum", "eth", "Ethereum", 3300.0, -1.25),
        ("tether", "usdt", "Tether", 1.0, 0.01),
        ("binancecoin", "bnb", "BNB", 580.0, 0.5),
        ("solana", "sol", "Solana", 150.0, 4.0),
        ("ripple", "xrp", "XRP", 0.52, -0.3),
        ("cardano", "ada", "Cardano", 0.45, 1.1),
        ("dogecoin", "doge", "Dogecoin", 0.12, 6.0),
        ("tron", "trx", "TRON", 0.11, 0.2),
        ("polkadot", "dot", "Polkadot", 7.1, -2.0),
        ("litecoin", "ltc", "Litecoin", 80.0, 0.7),
    ]
    .into_iter()
    .map(|(id, symbol, name, price, change)| {
        json!({
            "id": id,
            "symbol": symbol,
            "name": name,
            "current_price": price,
            "price_change_percentage_24h": change,
            "total_volume": 1000000,
        })
    })
    .collect()
}

async fn markets(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let per_page = q.get("per_page").and_then(|p| p.parse().ok()).unwrap_or(100);
    Json(Value::Array(coin_fixture().into_iter().take(per_page).collect()))
}

async fn market_chart(Path(id): Path<String>) -> Response {
    let (first, last) = match id.as_str() {
        "bitcoin" => (60000.0, 66000.0),
        "ethereum" => (3000.0, 3300.0),
        "emptycoin" => return Json(json!({"prices": []})).into_response(),
        _ => {
            return (StatusCode::NOT_FOUND, Json(json!({"error": "coin not found"}))).into_response();
        }
    };
    Json(json!({
        "prices": [[1700000000000u64, first], [1700043200000u64, (first + last) / 2.0], [1700086400000u64, last]],
        "market_caps": [],
        "total_volumes": [],
    }))
    .into_response()
}

async fn global() -> Json<Value> {
    Json(json!({
        "data": {
            "active_cryptocurrencies": 10000,
            "total_market_cap": {"usd": 2.41e12, "eur": 2.2e12},
            "total_volume": {"usd": 98.2e9},
            "market_cap_percentage": {"btc": 54.321, "eth": 16.5},
        }
    }))
}

async fn ohlc(Path(_id): Path<String>) -> Json<Value> {
    Json(json!([
        [1700000000000u64, 100.0, 110.0, 95.0, 105.0],
        [1700014400000u64, 105.0, 112.0, 101.0, 111.0],
        [1700028800000u64, 111.0, 115.0, 108.0, 109.0],
    ]))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({}))
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"error": format!("mock status {}", code)}))).into_response()
}

pub async fn spawn_mock() -> MockUpstream {
    let state = Arc::new(MockState::default());
    let app = Router::new()
        .route("/coins/markets", get(markets))
        .route("/coins/{id}/market_chart", get(market_chart))
        .route("/coins/{id}/ohlc", get(ohlc))
        .route("/global", get(global))
        .route("/slow", get(slow))
        .route("/status/{code}", get(status))
        .layer(from_fn_with_state(state.clone(), gate));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        base_url: format!("http://{}", addr),
        state,
    }
}

pub async fn send(app: &Router, req: axum::http::Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub fn get_req(uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn chat_req(body: Value) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
