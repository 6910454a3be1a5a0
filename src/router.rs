use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors},
    routes,
};

/// 组装中继服务的全部路由
///
/// 健康检查公开访问；消息中继路由挂共享密钥认证中间件。
pub fn create_router(state: AppState) -> Router {
    // 公开路由：存活探测
    let public_routes = Router::new()
        .route("/relay", get(routes::relay::handler::health))
        .route("/relay/health", get(routes::relay::handler::health));

    // 受保护路由：消息中继入口
    let protected_routes = Router::new()
        .route("/relay", post(routes::relay::handler::relay_message))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let base_uri = state.config.api_base_uri.clone();

    // 添加日志中间件
    Router::new()
        .nest(&base_uri, public_routes.merge(protected_routes))
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}
