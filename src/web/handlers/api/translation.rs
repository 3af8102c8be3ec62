//! 翻译API处理器

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    response::Json,
};

use super::{client_info, json_rejection, translation_error, ApiError};
use crate::web::types::{
    AppState, BulkTranslateRequest, BulkTranslationResponse, TranslateRequest, TranslationResponse,
};

/// 单条翻译处理器
///
/// 翻译成功后记录日志；记录失败不影响响应，错误放在 `log_error` 中返回。
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let Json(request) = payload.map_err(json_rejection)?;

    tracing::info!(
        "翻译请求: {} 个字符 → {}",
        request.text.chars().count(),
        request.target_language
    );

    let result = state
        .service
        .translate(&request.text, &request.target_language)
        .await
        .map_err(|e| translation_error(&e))?;

    let client = client_info(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    let log_error = match state.log_store.log_translation(&result, &client).await {
        Ok(_) => None,
        Err(e) => {
            tracing::error!("记录翻译日志失败 [{}]: {}", result.translation_id, e);
            Some(e.to_string())
        }
    };

    Ok(Json(TranslationResponse { result, log_error }))
}

/// 批量翻译处理器
pub async fn translate_bulk_text(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<BulkTranslateRequest>, JsonRejection>,
) -> Result<Json<BulkTranslationResponse>, ApiError> {
    let Json(request) = payload.map_err(json_rejection)?;

    let bulk = state
        .service
        .translate_bulk(request.texts, &request.target_language)
        .await
        .map_err(|e| translation_error(&e))?;

    let client = client_info(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    let log_error = match state.log_store.log_bulk_translations(&bulk, &client).await {
        Ok(_) => None,
        Err(e) => {
            tracing::error!("记录批量翻译日志失败: {}", e);
            Some(e.to_string())
        }
    };

    tracing::info!(
        "批量翻译完成: {}/{} 成功",
        bulk.success_count(),
        bulk.len()
    );

    Ok(Json(BulkTranslationResponse::new(bulk, log_error)))
}
