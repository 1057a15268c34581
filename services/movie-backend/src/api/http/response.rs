//! `success` / `message` 形式的 JSON 响应

use axum::Json;
use axum::http::{HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use movie_errors::AppError;
use serde_json::json;
use tracing::error;

/// 服务端错误对外统一展示的消息
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again later.";

/// 禁止缓存的响应头
pub const NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

pub fn success(message: impl Into<String>) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "message": message.into() }))
}

pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message.into() })),
    )
        .into_response()
}

/// 把 `AppError` 渲染为 `{success:false, message}`
///
/// 客户端错误保留原状态码与消息；服务端错误记录日志后返回 500 与通用消息
pub fn error_body(err: &AppError) -> Response {
    if err.is_client_error() {
        let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
        failure(status, err.message())
    } else {
        error!(error = %err, "Request failed");
        failure(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

/// 客户端错误一律 400，服务端错误 500
pub fn bad_request_or_internal(err: &AppError) -> Response {
    if err.is_client_error() {
        failure(StatusCode::BAD_REQUEST, err.message())
    } else {
        error_body(err)
    }
}

/// 302 跳转
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
