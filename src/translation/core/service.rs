//! 翻译服务核心实现
//!
//! `TranslationService` 负责输入验证、按配置选择翻译模式（词典或外部服务）、
//! 生成翻译ID与时间戳，以及批量翻译中的逐项错误隔离。
//!
//! ## 使用示例
//!
//! ```rust
//! use bhashantar::translation::core::TranslationService;
//!
//! # async fn demo() -> bhashantar::translation::error::Result<()> {
//! let service = TranslationService::dictionary();
//! let result = service.translate("hello", "hi").await?;
//! assert_eq!(result.translated_text, "नमस्ते");
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::translation::{
    config::{TranslationConfig, TranslationMode},
    core::engine::TranslationEngine,
    error::{Result, TranslationError, ValidationError},
    language::LanguageCode,
    provider::GoogleTranslateProvider,
};

/// 失败条目的源语言占位值
pub const UNKNOWN_SOURCE_LANGUAGE: &str = "unknown";

/// 一次翻译的结果
///
/// 创建后不再修改，成功的结果会交给翻译日志存储。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub success: bool,
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: LanguageCode,
    pub translation_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 批量翻译中单个条目的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "TranslationResult")]
pub enum BulkItem {
    Translated(TranslationResult),
    Failed {
        original_text: String,
        target_language: LanguageCode,
        translation_id: Uuid,
        timestamp: DateTime<Utc>,
        error: String,
    },
}

impl BulkItem {
    pub fn is_success(&self) -> bool {
        matches!(self, BulkItem::Translated(_))
    }

    pub fn translation_id(&self) -> Uuid {
        match self {
            BulkItem::Translated(result) => result.translation_id,
            BulkItem::Failed { translation_id, .. } => *translation_id,
        }
    }

    pub fn original_text(&self) -> &str {
        match self {
            BulkItem::Translated(result) => &result.original_text,
            BulkItem::Failed { original_text, .. } => original_text,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            BulkItem::Translated(_) => None,
            BulkItem::Failed { error, .. } => Some(error),
        }
    }

    fn failed(original_text: String, target_language: LanguageCode, error: &TranslationError) -> Self {
        BulkItem::Failed {
            original_text,
            target_language,
            translation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            error: error.to_string(),
        }
    }
}

/// 对外统一成扁平结构：失败条目的译文为空，源语言为 "unknown"
impl From<BulkItem> for TranslationResult {
    fn from(item: BulkItem) -> Self {
        match item {
            BulkItem::Translated(result) => result,
            BulkItem::Failed {
                original_text,
                target_language,
                translation_id,
                timestamp,
                error,
            } => TranslationResult {
                success: false,
                original_text,
                translated_text: String::new(),
                source_language: UNKNOWN_SOURCE_LANGUAGE.to_string(),
                target_language,
                translation_id,
                timestamp,
                error: Some(error),
            },
        }
    }
}

/// 批量翻译结果，条目顺序与输入一致
#[derive(Debug, Clone, Serialize)]
pub struct BulkTranslation {
    pub items: Vec<BulkItem>,
    pub timestamp: DateTime<Utc>,
}

impl BulkTranslation {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// 成功的翻译结果（只有这些会被记录）
    pub fn successful_results(&self) -> impl Iterator<Item = &TranslationResult> + '_ {
        self.items.iter().filter_map(|item| match item {
            BulkItem::Translated(result) => Some(result),
            BulkItem::Failed { .. } => None,
        })
    }
}

/// 翻译服务
///
/// 所有方法只需要共享引用，可以放进 `Arc` 在处理器之间共享。
#[derive(Debug)]
pub struct TranslationService {
    config: TranslationConfig,
    engine: TranslationEngine,
    provider: Option<GoogleTranslateProvider>,
    stats: ServiceStats,
}

impl TranslationService {
    /// 根据配置创建翻译服务
    ///
    /// 外部服务模式下会构建 HTTP 客户端；配置无效时返回 `ConfigError`。
    pub fn new(config: TranslationConfig) -> Result<Self> {
        Self::with_engine(config, TranslationEngine::with_builtin_dictionary())
    }

    /// 使用指定的查找引擎创建
    pub fn with_engine(config: TranslationConfig, engine: TranslationEngine) -> Result<Self> {
        config.validate()?;

        let provider = match config.mode() {
            TranslationMode::Provider => Some(GoogleTranslateProvider::new(&config)?),
            TranslationMode::Dictionary => None,
        };

        Ok(Self::assemble(config, engine, provider))
    }

    /// 词典模式的默认服务
    ///
    /// 默认配置总能通过验证，且词典模式不需要构建 HTTP 客户端。
    pub fn dictionary() -> Self {
        Self::assemble(
            TranslationConfig::dictionary(),
            TranslationEngine::with_builtin_dictionary(),
            None,
        )
    }

    fn assemble(
        config: TranslationConfig,
        engine: TranslationEngine,
        provider: Option<GoogleTranslateProvider>,
    ) -> Self {
        tracing::info!(
            "翻译服务已创建: 模式={}, 词典条目={}",
            config.mode(),
            engine.dictionary().len()
        );

        Self {
            config,
            engine,
            provider,
            stats: ServiceStats::default(),
        }
    }

    pub fn mode(&self) -> TranslationMode {
        self.config.mode()
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn engine(&self) -> &TranslationEngine {
        &self.engine
    }

    pub fn stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// 翻译单条文本
    ///
    /// `target` 是未经验证的语言代码，大小写与首尾空白不敏感。
    pub async fn translate(&self, text: &str, target: &str) -> Result<TranslationResult> {
        let started = Instant::now();
        self.stats.inc_requests();

        let outcome = match LanguageCode::parse(target) {
            Ok(target) => self.translate_validated(text, target).await,
            Err(e) => Err(e.into()),
        };

        self.stats.add_processing_time(started.elapsed());
        match &outcome {
            Ok(_) => self.stats.inc_successes(),
            Err(e) => {
                self.stats.inc_failures();
                tracing::debug!("翻译失败 [{}]: {}", e.error_code(), e);
            }
        }
        outcome
    }

    /// 批量翻译
    ///
    /// 列表为空、条目过多或语言代码无效时整个请求失败；其余错误只影响
    /// 对应条目。条目并发执行（上限为 `max_concurrent_requests`），
    /// 输出顺序与输入一致。
    pub async fn translate_bulk(&self, texts: Vec<String>, target: &str) -> Result<BulkTranslation> {
        self.stats.inc_bulk_requests();

        if texts.is_empty() {
            return Err(ValidationError::EmptyBatch.into());
        }
        if texts.len() > self.config.max_bulk_items {
            return Err(ValidationError::TooManyItems {
                max: self.config.max_bulk_items,
                actual: texts.len(),
            }
            .into());
        }
        let target = LanguageCode::parse(target)?;

        tracing::info!("批量翻译: {} 条 → {}", texts.len(), target);

        let items: Vec<BulkItem> = stream::iter(texts)
            .map(|text| self.translate_item(text, target))
            .buffered(self.config.max_concurrent_requests)
            .collect()
            .await;

        let bulk = BulkTranslation {
            items,
            timestamp: Utc::now(),
        };

        if bulk.failure_count() > 0 {
            tracing::warn!(
                "批量翻译部分失败: 成功 {}，失败 {}",
                bulk.success_count(),
                bulk.failure_count()
            );
        }

        Ok(bulk)
    }

    async fn translate_item(&self, text: String, target: LanguageCode) -> BulkItem {
        let started = Instant::now();
        self.stats.inc_requests();

        let item = match self.translate_validated(&text, target).await {
            Ok(result) => {
                self.stats.inc_successes();
                BulkItem::Translated(result)
            }
            Err(e) => {
                self.stats.inc_failures();
                BulkItem::failed(text, target, &e)
            }
        };

        self.stats.add_processing_time(started.elapsed());
        item
    }

    async fn translate_validated(&self, text: &str, target: LanguageCode) -> Result<TranslationResult> {
        let text = self.validate_text(text)?;

        let (translated_text, source_language) = match &self.provider {
            Some(provider) => {
                let output = tokio::time::timeout(
                    self.config.request_timeout(),
                    provider.translate(text, target, None),
                )
                .await??;
                (output.translated_text, output.source_language)
            }
            None => (self.translate_with_dictionary(text, target), LanguageCode::En.to_string()),
        };

        Ok(TranslationResult {
            success: true,
            original_text: text.to_string(),
            translated_text,
            source_language,
            target_language: target,
            translation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            error: None,
        })
    }

    /// 词典查找，未命中时返回 `[<目标语言大写>] <原文>`
    fn translate_with_dictionary(&self, text: &str, target: LanguageCode) -> String {
        match self.engine.lookup(text, target) {
            Some(translated) => translated,
            None => {
                self.stats.inc_dictionary_fallbacks();
                format!("[{}] {}", target.as_str().to_uppercase(), text)
            }
        }
    }

    /// 验证文本并返回去除首尾空白后的内容
    ///
    /// 长度限制作用于原始文本。
    fn validate_text<'a>(&self, text: &'a str) -> Result<&'a str, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ValidationError::TextTooLong {
                max: self.config.max_text_length,
                actual: length,
            });
        }

        Ok(trimmed)
    }
}

/// 服务运行统计
///
/// 计数器使用原子操作，处理器并发更新时无需加锁。
#[derive(Debug, Default)]
pub struct ServiceStats {
    /// 翻译请求数（批量中的每个条目各算一次）
    pub total_requests: AtomicUsize,
    pub successful_translations: AtomicUsize,
    pub failed_translations: AtomicUsize,
    /// 词典未命中、返回方括号原文的次数
    pub dictionary_fallbacks: AtomicUsize,
    pub bulk_requests: AtomicUsize,
    /// 总处理时间，以微秒为单位存储
    pub processing_time: AtomicU64,
}

impl ServiceStats {
    pub fn inc_requests(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_successes(&self) {
        self.successful_translations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failures(&self) {
        self.failed_translations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_dictionary_fallbacks(&self) {
        self.dictionary_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_bulk_requests(&self) {
        self.bulk_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_processing_time(&self, duration: Duration) {
        self.processing_time
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// 获取统计数据快照
    pub fn snapshot(&self) -> ServiceStatsSnapshot {
        ServiceStatsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_translations: self.successful_translations.load(Ordering::Relaxed),
            failed_translations: self.failed_translations.load(Ordering::Relaxed),
            dictionary_fallbacks: self.dictionary_fallbacks.load(Ordering::Relaxed),
            bulk_requests: self.bulk_requests.load(Ordering::Relaxed),
            processing_time_ms: self.processing_time.load(Ordering::Relaxed) / 1000,
        }
    }
}

/// 统计数据的不可变快照
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceStatsSnapshot {
    pub total_requests: usize,
    pub successful_translations: usize,
    pub failed_translations: usize,
    pub dictionary_fallbacks: usize,
    pub bulk_requests: usize,
    pub processing_time_ms: u64,
}

impl ServiceStatsSnapshot {
    /// 成功率（百分比），没有请求时为 0
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            100.0 * self.successful_translations as f64 / self.total_requests as f64
        }
    }
}
