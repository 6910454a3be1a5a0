use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    utils::{error_codes, error_to_api_response},
};

/// 校验x-api-key请求头与配置的共享密钥一致
///
/// 未通过校验的请求直接返回401，不做任何限流计数。
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let provided = req.headers().get("x-api-key").and_then(|h| h.to_str().ok());

    match provided {
        Some(key) if key == state.config.api_key => next.run(req).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            error_to_api_response::<()>(error_codes::AUTH_FAILED, "未授权访问".to_string()),
        )
            .into_response(),
    }
}
