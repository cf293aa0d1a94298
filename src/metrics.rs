use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("coinchat_requests_total", "Total number of admitted API requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter =
        register_counter!("coinchat_rate_limited_total", "Total requests rejected by the rate limiter").unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("coinchat_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("coinchat_cache_misses_total", "Total cache misses").unwrap();
    pub static ref UPSTREAM_ERRORS: Counter =
        register_counter!("coinchat_upstream_errors_total", "Total failed market data calls").unwrap();
    pub static ref CHAT_LATENCY: Histogram = register_histogram!(
        "coinchat_chat_latency_seconds",
        "Chat request latency in seconds"
    )
    .unwrap();
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("coinchat_cache_size", "Current number of items in cache").unwrap();
}
