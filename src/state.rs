use crate::cache::ResponseCache;
use crate::config::Args;
use crate::market::MarketService;
use crate::rate_limit::RateLimiter;
use crate::upstream::UpstreamClient;

// app's shared state, built once in main and handed to axum behind an Arc
pub struct AppState {
    pub market: MarketService,
    pub rate_limiter: RateLimiter,
    pub dev_mode: bool,
}

impl AppState {
    pub fn new(market: MarketService, rate_limiter: RateLimiter, dev_mode: bool) -> Self {
        Self {
            market,
            rate_limiter,
            dev_mode,
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, reqwest::Error> {
        let client = UpstreamClient::new(
            args.upstream_url.clone(),
            args.api_key.clone(),
            args.upstream_timeout(),
        )?;
        let market = MarketService::new(client, ResponseCache::new(args.cache_ttl()));
        let rate_limiter = RateLimiter::new(args.rate_limit, args.rate_window());
        Ok(Self::new(market, rate_limiter, args.dev))
    }
}
