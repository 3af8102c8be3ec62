//! 翻译模块
//!
//! 提供完整的翻译功能，采用清晰的模块化架构：
//! - **core**: 翻译服务与词典查找引擎
//! - **storage**: 内置双语词典
//! - **provider**: 外部翻译服务客户端
//! - **language**: 支持的语言代码
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use bhashantar::translation::{ConfigManager, TranslationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigManager::load(None)?.into_config();
//! let service = TranslationService::new(config)?;
//!
//! let result = service.translate("good morning", "kn").await?;
//! println!("{} → {}", result.original_text, result.translated_text);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// 子模块声明
// ============================================================================

/// 配置管理模块 - 处理翻译相关的所有配置
pub mod config;

/// 核心模块 - 翻译服务与查找引擎
pub mod core;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 语言代码
pub mod language;

/// 外部翻译服务客户端
pub mod provider;

/// 存储模块 - 内置词典
pub mod storage;

// ============================================================================
// 核心API导出
// ============================================================================

pub use self::core::{
    BulkItem, BulkTranslation, ServiceStats, ServiceStatsSnapshot, TranslationEngine, TranslationResult,
    TranslationService, TRANSLATION_NOT_AVAILABLE,
};

pub use config::{constants, ConfigManager, TranslationConfig, TranslationMode};

pub use error::{ErrorCategory, ErrorSeverity, TranslationError, ValidationError};

pub use language::LanguageCode;

pub use provider::GoogleTranslateProvider;

pub use storage::{Dictionary, TranslationEntry};

// ============================================================================
// 模块信息
// ============================================================================

/// 模块版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 使用内置词典翻译单个短语（便利函数）
///
/// 无法翻译时返回 `"Translation not available"`。
///
/// ```rust
/// use bhashantar::translation::{resolve, LanguageCode};
///
/// assert_eq!(resolve("thank you", LanguageCode::Hi), "धन्यवाद");
/// assert_eq!(resolve("नमस्ते", LanguageCode::En), "hello");
/// ```
pub fn resolve(text: &str, target: LanguageCode) -> String {
    use std::sync::OnceLock;

    static ENGINE: OnceLock<TranslationEngine> = OnceLock::new();
    ENGINE
        .get_or_init(TranslationEngine::with_builtin_dictionary)
        .resolve(text, target)
}
