use clap::Parser;
use std::time::Duration;

use crate::upstream::DEFAULT_BASE_URL;

// CLI argument structure, every flag can also come from the environment / .env
#[derive(Parser, Debug, Clone)]
#[command(name = "coinchat-gateway")]
#[command(about = "Crypto market chatbot backed by a caching, rate limited CoinGecko proxy")]
pub struct Args {
    // Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    // How many following ports to try when the port is taken (0 = fail fast)
    #[arg(long, env = "PORT_FALLBACK", default_value_t = 0)]
    pub port_fallback: u16,

    // Market data API key, sent on every upstream call
    #[arg(long, env = "COINGECKO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    // Market data API base url
    #[arg(long, env = "COINGECKO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream_url: String,

    // Upstream request timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout: u64,

    // Cache TTL in seconds
    #[arg(short, long, env = "CACHE_TTL_SECS", default_value_t = 60)]
    pub cache_ttl: u64,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT_MAX", default_value_t = 50)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value_t = 60)]
    pub rate_window: u64,

    // Expose panic details in 500 responses
    #[arg(long, env = "DEV_MODE", default_value_t = false)]
    pub dev: bool,
}

impl Args {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let args = Args::try_parse_from(["coinchat-gateway"]).unwrap();
        assert_eq!(args.cache_ttl(), Duration::from_secs(60));
        assert_eq!(args.rate_limit, 50);
        assert_eq!(args.rate_window(), Duration::from_secs(60));
        assert_eq!(args.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(args.port_fallback, 0);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "coinchat-gateway",
            "--port",
            "8081",
            "--rate-limit",
            "5",
            "--upstream-url",
            "http://127.0.0.1:9000",
            "--dev",
        ])
        .unwrap();
        assert_eq!(args.port, 8081);
        assert_eq!(args.rate_limit, 5);
        assert_eq!(args.upstream_url, "http://127.0.0.1:9000");
        assert!(args.dev);
    }
}
