//! 翻译日志查询处理器

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;

use super::{error_response, query_rejection, translation_error, ApiError};
use crate::translation::constants::{DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT};
use crate::translation::{TranslationError, ValidationError};
use crate::web::types::{AppState, LogsQuery, LogsResponse};

/// 分页查询翻译日志，最新的在前
pub async fn get_translation_logs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<LogsResponse>, ApiError> {
    let Query(query) = query.map_err(query_rejection)?;

    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    let offset = query.offset.unwrap_or(0);

    if !(1..=MAX_LOG_LIMIT).contains(&limit) {
        let error: TranslationError = ValidationError::InvalidPagination(format!(
            "limit must be between 1 and {}",
            MAX_LOG_LIMIT
        ))
        .into();
        return Err(translation_error(&error));
    }

    let logs = state
        .log_store
        .get_translation_logs(limit, offset)
        .await
        .map_err(|e| {
            tracing::error!("查询翻译日志失败: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to retrieve logs: {}", e),
                "LOG_RETRIEVAL_ERROR",
            )
        })?;

    Ok(Json(LogsResponse {
        success: true,
        total_returned: logs.len(),
        logs,
        limit,
        offset,
        timestamp: Utc::now(),
    }))
}
