//! 翻译系统核心模块
//!
//! ## 模块依赖关系
//!
//! ```text
//! TranslationService (service.rs)
//!     ├── TranslationConfig (config/manager.rs)
//!     ├── GoogleTranslateProvider (provider.rs)    外部服务模式
//!     └── TranslationEngine (engine.rs)            词典模式
//!             └── Dictionary (storage/dictionary.rs)
//! ```

pub mod engine;
pub mod service;

/// 词典查找引擎
pub use engine::{TranslationEngine, TRANSLATION_NOT_AVAILABLE};

/// 翻译服务 - 主要的对外接口
pub use service::TranslationService;

pub use service::{BulkItem, BulkTranslation, ServiceStats, ServiceStatsSnapshot, TranslationResult};
