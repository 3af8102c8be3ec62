//! 配置管理器
//!
//! 配置来源按优先级从低到高：默认值、配置文件、环境变量（含 `.env` 文件）

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{helpers::config_error, Result};

/// 翻译模式
///
/// 由配置决定，而不是按请求选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMode {
    /// 内置词典
    Dictionary,
    /// 外部翻译服务
    Provider,
}

impl TranslationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationMode::Dictionary => "dictionary",
            TranslationMode::Provider => "provider",
        }
    }
}

impl fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 翻译配置
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    // 模式
    pub use_mock_translation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api_url: String,

    // 输入限制
    pub max_text_length: usize,
    pub max_bulk_items: usize,

    // 性能配置
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

// API 密钥不输出到调试信息
impl fmt::Debug for TranslationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationConfig")
            .field("use_mock_translation", &self.use_mock_translation)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("max_text_length", &self.max_text_length)
            .field("max_bulk_items", &self.max_bulk_items)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_concurrent_requests", &self.max_concurrent_requests)
            .finish()
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            use_mock_translation: true,
            api_key: None,
            api_url: constants::DEFAULT_API_URL.to_string(),

            max_text_length: constants::DEFAULT_MAX_TEXT_LENGTH,
            max_bulk_items: constants::DEFAULT_MAX_BULK_ITEMS,

            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT.as_secs(),
            max_concurrent_requests: constants::DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl TranslationConfig {
    /// 词典模式配置
    pub fn dictionary() -> Self {
        Self::default()
    }

    /// 外部服务模式配置
    pub fn provider(api_key: impl Into<String>, api_url: Option<&str>) -> Self {
        let mut config = Self {
            use_mock_translation: false,
            api_key: Some(api_key.into()),
            ..Self::default()
        };
        if let Some(url) = api_url {
            config.api_url = url.to_string();
        }
        config
    }

    /// 当前翻译模式
    pub fn mode(&self) -> TranslationMode {
        if self.use_mock_translation {
            TranslationMode::Dictionary
        } else {
            TranslationMode::Provider
        }
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        if self.max_text_length == 0 {
            return Err(config_error("max_text_length must be greater than 0"));
        }

        if self.max_bulk_items == 0 {
            return Err(config_error("max_bulk_items must be greater than 0"));
        }

        if self.max_concurrent_requests == 0 {
            return Err(config_error("max_concurrent_requests must be greater than 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(config_error("request_timeout_secs must be greater than 0"));
        }

        if self.mode() == TranslationMode::Provider {
            match self.api_key.as_deref().map(str::trim) {
                Some(key) if !key.is_empty() => {}
                _ => {
                    return Err(config_error(
                        "GOOGLE_TRANSLATE_API_KEY is required when mock translation is disabled",
                    ))
                }
            }

            if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
                return Err(config_error(format!("invalid provider URL: {}", self.api_url)));
            }
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    ///
    /// 只覆盖显式设置且有效的变量；无效值会记录警告并保留原值。
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{translation, EnvVar};

        fn apply<T, V: EnvVar<T>>(target: &mut T) {
            if !V::is_set() {
                return;
            }
            match V::get() {
                Ok(value) => *target = value,
                Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
            }
        }

        apply::<_, translation::UseMock>(&mut self.use_mock_translation);
        apply::<_, translation::ApiUrl>(&mut self.api_url);
        apply::<_, translation::MaxTextLength>(&mut self.max_text_length);
        apply::<_, translation::MaxBulkItems>(&mut self.max_bulk_items);
        apply::<_, translation::MaxConcurrentRequests>(&mut self.max_concurrent_requests);

        if translation::ApiKey::is_set() {
            match translation::ApiKey::get() {
                Ok(key) => self.api_key = Some(key),
                Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
            }
        }

        if translation::RequestTimeout::is_set() {
            match translation::RequestTimeout::get() {
                Ok(timeout) => self.request_timeout_secs = timeout.as_secs(),
                Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
            }
        }
    }

    /// 转换为Duration类型
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: TranslationConfig,
}

impl ConfigManager {
    /// 加载配置：`.env` → 配置文件 → 环境变量覆盖 → 验证
    ///
    /// 指定 `path` 时只读取该文件，否则按 `CONFIG_PATHS` 搜索。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(env_file) = Self::load_dotenv() {
            tracing::info!("已加载环境变量文件: {}", env_file);
        }

        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::search_config()?,
        };
        config.apply_env_overrides();
        config.validate()?;

        tracing::info!("翻译模式: {}", config.mode());
        Ok(Self { config })
    }

    /// 使用给定配置创建（跳过文件与环境变量）
    pub fn from_config(config: TranslationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 获取配置
    pub fn get_config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn into_config(self) -> TranslationConfig {
        self.config
    }

    fn search_config() -> Result<TranslationConfig> {
        for path in constants::CONFIG_PATHS {
            let path = Path::new(path);
            if path.exists() {
                tracing::info!("加载配置文件: {}", path.display());
                return Self::load_from_file(path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslationConfig::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file(path: &Path) -> Result<TranslationConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("failed to read {}: {}", path.display(), e)))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| config_error(format!("failed to parse JSON config: {}", e)))
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// 加载第一个存在的 .env 文件，返回其文件名
    ///
    /// 只在第一次调用时读取文件，之后返回相同结果。已存在的环境变量不会被覆盖。
    pub fn load_dotenv() -> Option<&'static str> {
        static LOADED: OnceLock<Option<&'static str>> = OnceLock::new();
        *LOADED.get_or_init(|| {
            constants::ENV_FILES
                .iter()
                .copied()
                .find(|env_file| Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok())
        })
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&TranslationConfig::default())
            .map_err(|e| config_error(format!("failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }
}
