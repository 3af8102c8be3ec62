//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;

use thiserror::Error;

/// 输入验证错误
///
/// 验证错误直接返回给调用方，不会被记录为一次翻译。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 文本为空（或只包含空白）
    #[error("Text cannot be empty")]
    EmptyText,

    /// 文本超过最大长度
    #[error("Text exceeds maximum length of {max} characters")]
    TextTooLong { max: usize, actual: usize },

    /// 不支持的语言代码
    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    /// 批量请求的文本列表为空
    #[error("Texts list cannot be empty")]
    EmptyBatch,

    /// 批量请求条目过多
    #[error("Maximum {max} texts allowed per bulk request")]
    TooManyItems { max: usize, actual: usize },

    /// 分页参数无效
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
}

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 输入验证错误
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    /// 外部翻译服务错误
    #[error("Translation provider error: {0}")]
    ProviderError(String),

    /// 超时错误
    #[error("Translation provider timed out: {0}")]
    TimeoutError(String),

    /// 翻译日志持久化错误
    #[error("Failed to log translation: {0}")]
    PersistenceError(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 检查错误是否可重试
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::ProviderError(_) => true,
            TranslationError::TimeoutError(_) => true,
            TranslationError::PersistenceError(_) => true,
            TranslationError::InvalidInput(_) => false,
            TranslationError::ConfigError(_) => false,
            TranslationError::InternalError(_) => false,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::ProviderError(_) => ErrorSeverity::Error,
            TranslationError::TimeoutError(_) => ErrorSeverity::Warning,
            TranslationError::PersistenceError(_) => ErrorSeverity::Warning,
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::InvalidInput(_) => ErrorCategory::Validation,
            TranslationError::ProviderError(_) => ErrorCategory::Provider,
            TranslationError::TimeoutError(_) => ErrorCategory::Provider,
            TranslationError::PersistenceError(_) => ErrorCategory::Persistence,
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// 对外暴露的稳定错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            TranslationError::InvalidInput(_) => "VALIDATION_ERROR",
            TranslationError::ProviderError(_) => "TRANSLATION_ERROR",
            TranslationError::TimeoutError(_) => "TRANSLATION_TIMEOUT",
            TranslationError::PersistenceError(_) => "DB_LOG_ERROR",
            TranslationError::ConfigError(_) => "CONFIG_ERROR",
            TranslationError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(self, context: T) -> Self {
        let new_msg = format!("{} (context: {})", self, context);

        match self {
            TranslationError::ProviderError(_) => TranslationError::ProviderError(new_msg),
            TranslationError::TimeoutError(_) => TranslationError::TimeoutError(new_msg),
            TranslationError::PersistenceError(_) => TranslationError::PersistenceError(new_msg),
            TranslationError::ConfigError(_) => TranslationError::ConfigError(new_msg),
            TranslationError::InternalError(_) => TranslationError::InternalError(new_msg),
            // 验证错误的消息直接面向调用方，保持原样
            error @ TranslationError::InvalidInput(_) => error,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    Provider,
    Persistence,
    Configuration,
    Internal,
}

/// 标准错误转换
impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::ConfigError(format!("IO error: {}", error))
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ProviderError(format!("invalid JSON payload: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ConfigError(format!("TOML parse error: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        // 请求 URL 可能带有凭据，不能出现在返回给调用方的消息中
        let error = error.without_url();
        if error.is_timeout() {
            TranslationError::TimeoutError(error.to_string())
        } else {
            TranslationError::ProviderError(error.to_string())
        }
    }
}

impl From<tokio::time::error::Elapsed> for TranslationError {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        TranslationError::TimeoutError(error.to_string())
    }
}

#[cfg(feature = "web")]
impl From<mongodb::error::Error> for TranslationError {
    fn from(error: mongodb::error::Error) -> Self {
        TranslationError::PersistenceError(error.to_string())
    }
}

/// 错误结果类型别名
pub type Result<T, E = TranslationError> = std::result::Result<T, E>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误
    pub fn log_error(error: &TranslationError) {
        let code = error.error_code();
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("翻译信息 [{}]: {}", code, error),
            ErrorSeverity::Warning => tracing::warn!("翻译警告 [{}]: {}", code, error),
            ErrorSeverity::Error => tracing::error!("翻译错误 [{}]: {}", code, error),
            ErrorSeverity::Critical => tracing::error!("翻译严重错误 [{}]: {}", code, error),
        }
    }

    /// 创建外部服务错误
    pub fn provider_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ProviderError(msg.to_string())
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }

    /// 创建持久化错误
    pub fn persistence_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::PersistenceError(msg.to_string())
    }

    /// 创建内部错误
    pub fn internal_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InternalError(msg.to_string())
    }
}
