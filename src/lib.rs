pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod market;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod rate_limit;
pub mod router;
pub mod server;
pub mod state;
pub mod upstream;

pub use router::build_router;
pub use state::AppState;
