mod chat;
mod health;
mod market;
mod metrics;

pub use chat::chat_handler;
pub use health::health_handler;
pub use market::{global_handler, historical_handler, ohlc_handler, trends_handler};
pub use metrics::metrics_handler;
