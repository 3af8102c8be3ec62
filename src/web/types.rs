//! Web 模块的数据类型定义

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::translation::{
    BulkItem, BulkTranslation, LanguageCode, ServiceStatsSnapshot, TranslationResult, TranslationService,
};
use crate::web::audit::{TranslationLogEntry, TranslationLogStore};

/// 应用状态
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<TranslationService>,
    pub log_store: TranslationLogStore,
    pub app_name: String,
}

impl AppState {
    pub fn new(service: TranslationService, log_store: TranslationLogStore, app_name: impl Into<String>) -> Self {
        Self {
            service: Arc::new(service),
            log_store,
            app_name: app_name.into(),
        }
    }
}

/// 翻译请求
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
}

/// 批量翻译请求
#[derive(Debug, Deserialize)]
pub struct BulkTranslateRequest {
    pub texts: Vec<String>,
    pub target_language: String,
}

/// 翻译响应
#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    #[serde(flatten)]
    pub result: TranslationResult,
    /// 记录日志失败时的错误信息，翻译本身仍然成功
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_error: Option<String>,
}

/// 批量翻译响应
#[derive(Debug, Serialize)]
pub struct BulkTranslationResponse {
    pub success: bool,
    pub translations: Vec<BulkItem>,
    pub total_translations: usize,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_error: Option<String>,
}

impl BulkTranslationResponse {
    pub fn new(bulk: BulkTranslation, log_error: Option<String>) -> Self {
        Self {
            success: true,
            total_translations: bulk.len(),
            timestamp: bulk.timestamp,
            translations: bulk.items,
            log_error,
        }
    }
}

/// 日志查询参数
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

/// 日志查询响应
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub success: bool,
    pub logs: Vec<TranslationLogEntry>,
    pub total_returned: usize,
    pub limit: u32,
    pub offset: u64,
    pub timestamp: DateTime<Utc>,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub version: &'static str,
    pub mode: &'static str,
    pub log_store: &'static str,
}

/// 服务信息响应
#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub service: String,
    pub version: &'static str,
    pub status: &'static str,
    pub mode: &'static str,
    pub health_check: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// 语言信息
#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub code: LanguageCode,
    pub name: &'static str,
    /// 是否包含在内置词典中
    pub dictionary: bool,
}

impl From<LanguageCode> for LanguageInfo {
    fn from(code: LanguageCode) -> Self {
        Self {
            code,
            name: code.display_name(),
            dictionary: code.in_dictionary(),
        }
    }
}

/// 支持的语言列表响应
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub success: bool,
    pub languages: Vec<LanguageInfo>,
    pub total: usize,
    pub dictionary_entries: usize,
}

/// 服务统计响应
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub mode: &'static str,
    #[serde(flatten)]
    pub stats: ServiceStatsSnapshot,
    pub success_rate: f64,
    pub logged_translations: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

/// 统一错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.into(),
            timestamp: Utc::now(),
        }
    }
}
