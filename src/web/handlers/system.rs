//! 服务信息与健康检查

use std::sync::Arc;

use axum::{extract::State, response::Json};
use chrono::Utc;

use crate::web::types::{AppState, HealthResponse, ServiceInfoResponse};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 根路径：服务信息
pub async fn index(State(state): State<Arc<AppState>>) -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        service: state.app_name.clone(),
        version: VERSION,
        status: "running",
        mode: state.service.mode().as_str(),
        health_check: "/health",
        timestamp: Utc::now(),
    })
}

/// 健康检查
///
/// 日志存储不可用时服务仍可翻译，状态报告为 "degraded"。
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = match state.log_store.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("翻译日志存储不可用: {}", e);
            "degraded"
        }
    };

    Json(HealthResponse {
        status,
        timestamp: Utc::now(),
        service: state.app_name.clone(),
        version: VERSION,
        mode: state.service.mode().as_str(),
        log_store: state.log_store.backend_name(),
    })
}
