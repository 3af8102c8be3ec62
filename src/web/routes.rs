//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::{handlers::*, types::AppState};

/// 创建路由结构
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // 服务信息
        .route("/", get(index))
        .route("/health", get(health_check))
        // 翻译API
        .route("/api/v1/translate", post(translate_text))
        .route("/api/v1/translate/bulk", post(translate_bulk_text))
        .route("/api/v1/translate/logs", get(get_translation_logs))
        // 元数据
        .route("/api/v1/languages", get(list_languages))
        .route("/api/v1/stats", get(service_stats))
}
