//! 语言列表与服务统计处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};
use chrono::Utc;

use crate::translation::LanguageCode;
use crate::web::types::{AppState, LanguageInfo, LanguagesResponse, StatsResponse};

/// 支持的语言
pub async fn list_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    let languages: Vec<LanguageInfo> = LanguageCode::ALL.into_iter().map(LanguageInfo::from).collect();

    Json(LanguagesResponse {
        success: true,
        total: languages.len(),
        languages,
        dictionary_entries: state.service.engine().dictionary().len(),
    })
}

/// 服务统计
pub async fn service_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let stats = state.service.stats().snapshot();

    let logged_translations = match state.log_store.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!("统计翻译日志失败: {}", e);
            None
        }
    };

    Json(StatsResponse {
        success: true,
        mode: state.service.mode().as_str(),
        success_rate: stats.success_rate(),
        stats,
        logged_translations,
        timestamp: Utc::now(),
    })
}
