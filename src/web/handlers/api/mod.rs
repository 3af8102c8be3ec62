//! API 处理器

pub mod logs;
pub mod meta;
pub mod translation;

pub use logs::*;
pub use meta::*;
pub use translation::*;

use std::net::SocketAddr;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{HeaderMap, StatusCode},
    response::Json,
};

use crate::translation::error::helpers::log_error;
use crate::translation::{ErrorCategory, TranslationError};
use crate::web::audit::ClientInfo;
use crate::web::types::ErrorResponse;

/// 处理器统一的错误类型
pub type ApiError = (StatusCode, Json<serde_json::Value>);

/// 构造统一格式的错误响应
pub fn error_response(status: StatusCode, error: impl Into<String>, error_code: &str) -> ApiError {
    let body = ErrorResponse::new(error, error_code);
    (status, Json(serde_json::to_value(body).unwrap_or_default()))
}

/// 翻译错误 → HTTP 错误，同时按严重程度记录
pub fn translation_error(error: &TranslationError) -> ApiError {
    log_error(error);

    let status = match error.category() {
        ErrorCategory::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCategory::Provider
        | ErrorCategory::Persistence
        | ErrorCategory::Configuration
        | ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error.to_string(), error.error_code())
}

/// 请求体无法解析
pub fn json_rejection(rejection: JsonRejection) -> ApiError {
    let status = match rejection.status() {
        StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    error_response(status, rejection.body_text(), "VALIDATION_ERROR")
}

/// 查询参数无法解析
pub fn query_rejection(rejection: QueryRejection) -> ApiError {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text(), "VALIDATION_ERROR")
}

/// 从请求头和连接信息中提取调用方
///
/// 地址优先取 `X-Forwarded-For` 的第一跳，其次 `X-Real-IP`，最后是连接对端。
pub fn client_info(headers: &HeaderMap, peer: Option<SocketAddr>) -> ClientInfo {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let ip_address = header("x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| header("x-real-ip"))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()));

    let user_agent = header("user-agent").map(str::to_string);

    ClientInfo::new(ip_address, user_agent)
}
