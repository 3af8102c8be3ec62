//! # Bhashantar
//!
//! 短文本翻译微服务。未配置外部翻译服务时使用内置的双语词典：
//! 以英语为枢轴，在印地语、泰米尔语、卡纳达语、孟加拉语和英语之间查找。
//!
//! ## 模块组织
//!
//! - `translation` - 词典、查找引擎、翻译服务与外部服务客户端
//! - `env` - 类型安全的环境变量
//! - `web` - HTTP 接口与翻译日志（可选）

pub mod env;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use translation::{
    LanguageCode, TranslationConfig, TranslationError, TranslationResult, TranslationService,
};
