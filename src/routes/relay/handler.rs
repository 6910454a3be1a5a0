use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Json, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use super::model::RelayRequest;
use crate::AppState;
use crate::dispatch::{DispatchOutcome, WebhookPayload, select_shard};
use crate::limiter::{RateLimitDecision, RateLimitWindow};
use crate::utils::{error_codes, error_to_api_response, success_to_api_response};

/// 存活探测，无任何副作用
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 消息中继入口
///
/// 解析请求 → 限流 → 构建出站载荷 → 选分片 → failover投递。
/// 消息要么在本次请求内送达，要么带错误丢弃，不进任何队列。
#[axum::debug_handler]
pub async fn relay_message(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                error_to_api_response(
                    error_codes::VALIDATION_ERROR,
                    format!("请求体解析失败: {}", rejection),
                ),
            );
        }
    };

    let identity = caller_identity(&req, &headers, addr);
    tracing::debug!("Relay request from identity: {}", identity);

    // 限流判定；计数存储不可用时直接拒绝请求，绝不放行
    match state.limiter.check(&identity).await {
        Ok(RateLimitDecision::Allowed) => {}
        Ok(RateLimitDecision::Throttled { window, limit }) => {
            let msg = match window {
                RateLimitWindow::Minute => {
                    format!("每分钟最多发送{}条消息，请稍后重试", limit)
                }
                RateLimitWindow::Day => format!("每日最多发送{}条消息，请明日重试", limit),
            };
            return (
                StatusCode::TOO_MANY_REQUESTS,
                error_to_api_response(error_codes::RATE_LIMIT, msg),
            );
        }
        Err(e) => {
            tracing::error!("Rate limit check failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "限流计数服务不可用".to_string(),
                ),
            );
        }
    }

    let hooks = &state.config.webhooks;
    if hooks.is_empty() {
        tracing::error!("No webhook endpoints configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_to_api_response(error_codes::CONFIG_ERROR, "未配置webhook地址".to_string()),
        );
    }

    let payload = WebhookPayload::new(
        req.content.as_deref().unwrap_or_default(),
        req.embeds,
        req.everyone,
    );
    let start_index = select_shard(&identity, hooks.len());

    match state.dispatcher.dispatch(&payload, hooks, start_index).await {
        DispatchOutcome::Delivered { shard } => (
            StatusCode::OK,
            success_to_api_response(serde_json::json!({ "shard": shard })),
        ),
        DispatchOutcome::AllFailed => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_to_api_response(
                error_codes::UPSTREAM_BUSY,
                "所有webhook分片均不可用，消息已丢弃".to_string(),
            ),
        ),
    }
}

/// 解析调用方identity：优先请求体中的user_id，其次代理头，最后回退到对端地址
fn caller_identity(req: &RelayRequest, headers: &HeaderMap, addr: SocketAddr) -> String {
    if let Some(user_id) = req.user_id.as_deref() {
        if !user_id.trim().is_empty() {
            return user_id.trim().to_string();
        }
    }
    headers
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
        })
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| addr.ip().to_string())
}
