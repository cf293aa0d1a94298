use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::error::ErrorBody;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_TOTAL};
use crate::state::AppState;

// Rate limit entry - tracks requests per IP
pub struct RateWindow {
    pub count: u32,
    pub window_start: Instant,
}

/// Fixed-window request counter per client.
///
/// The counter resets once the window has elapsed, so a client can get up to
/// twice the limit through in a short burst around the boundary.
pub struct RateLimiter {
    windows: DashMap<String, RateWindow>,
    max_requests: u32, // max request allowed
    window: Duration,  // Duration of rate limit
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn allow(&self, client_id: &str) -> bool {
        let now = Instant::now();

        // entry guard holds the shard lock for the whole read-modify-write
        let mut entry = self
            .windows
            .entry(client_id.to_string())
            .or_insert(RateWindow {
                count: 0,
                window_start: now,
            });

        // window expired..? Reset it
        if now.duration_since(entry.window_start) > self.window {
            entry.count = 1;
            entry.window_start = now;
            return true;
        }

        // under limit.? Allow
        if entry.count < self.max_requests {
            entry.count += 1;
            return true;
        }

        // over limit
        false
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

fn client_id(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// Middleware: reject before anything else touches the request
pub async fn enforce(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let client = client_id(&req);

    if !state.rate_limiter.allow(&client) {
        RATE_LIMITED_TOTAL.inc();
        tracing::warn!(client = %client, path = %req.uri().path(), "rate limit exceeded");
        let body = Json(ErrorBody {
            error: "rate_limited",
            message: format!(
                "Too many requests. Limit is {} per {} seconds, please try again later.",
                state.rate_limiter.max_requests(),
                state.rate_limiter.window().as_secs()
            ),
        });
        return (StatusCode::TOO_MANY_REQUESTS, body).into_response();
    }

    REQUEST_TOTAL.inc();
    next.run(req).await
}
