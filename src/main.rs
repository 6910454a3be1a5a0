use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use relay_backend::{
    AppState,
    cache::RedisCounterStore,
    config::Config,
    dispatch::{HttpWebhookTransport, WebhookDispatcher},
    limiter::RateLimiter,
    router::create_router,
};
#[cfg(debug_assertions)]
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    if config.webhooks.is_empty() {
        tracing::warn!("No webhook endpoints configured, relay requests will fail");
    } else {
        tracing::info!("Loaded {} webhook endpoint(s)", config.webhooks.len());
    }

    // 设置 Redis 客户端作为计数器存储
    let redis_client =
        redis::Client::open(config.redis_url.clone()).expect("Failed to create Redis client");
    let counter_store = Arc::new(RedisCounterStore::new(Arc::new(redis_client)));

    // 设置限流器与分发器
    let limiter = Arc::new(RateLimiter::new(
        counter_store,
        config.rate_limit_per_minute,
        config.rate_limit_per_day,
    ));
    let transport = Arc::new(
        HttpWebhookTransport::new(config.webhook_timeout())
            .expect("Failed to create webhook client"),
    );
    let dispatcher = Arc::new(WebhookDispatcher::new(transport, config.failover_tries));

    // 设置应用状态
    let state = AppState {
        config: config.clone(),
        limiter,
        dispatcher,
    };

    let router = create_router(state.clone());

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Relay listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
