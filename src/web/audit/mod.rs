//! # 翻译日志模块
//!
//! 保存成功翻译的审计记录。
//!
//! - `service`: 日志存储（MongoDB 或进程内存）
//! - `types`: 日志条目、MongoDB 文档与调用方信息
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use bhashantar::translation::TranslationService;
//! use bhashantar::web::audit::{ClientInfo, TranslationLogStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TranslationService::dictionary();
//! let store = TranslationLogStore::in_memory();
//!
//! let result = service.translate("hello", "ta").await?;
//! store.log_translation(&result, &ClientInfo::default()).await?;
//!
//! let recent = store.get_translation_logs(50, 0).await?;
//! assert_eq!(recent.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod service;
pub mod types;

pub use service::TranslationLogStore;
pub use types::{ClientInfo, TranslationLogDocument, TranslationLogEntry};
