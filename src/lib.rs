use std::sync::Arc;

use config::Config;
use dispatch::WebhookDispatcher;
use limiter::RateLimiter;

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod limiter;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub limiter: Arc<RateLimiter>,
    pub dispatcher: Arc<WebhookDispatcher>,
}
