use dashmap::DashMap;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

// Cache entry with timestamp
#[derive(Clone)]
pub struct CacheEntry {
    pub payload: Value,
    pub fetched_at: Instant,
}

// Create a cache key (hash of endpoint + sorted params)
pub fn make_cache_key(endpoint: &str, params: &BTreeMap<String, String>) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(endpoint);
    hasher.update("?");
    hasher.update(query);
    format!("{:x}", hasher.finalize())
}

/// Last successful upstream payload per request signature.
///
/// Expired entries are masked on read but stay in the map until the key is
/// fetched again.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>, // key -> CacheEntry
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    pub fn put(&self, key: String, payload: Value) {
        self.entries.insert(
            key,
            CacheEntry {
                payload,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
