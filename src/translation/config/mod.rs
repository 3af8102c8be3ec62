//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslationConfig, TranslationMode};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 输入限制
    pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1000;
    pub const DEFAULT_MAX_BULK_ITEMS: usize = 10;

    // 默认API设置
    pub const DEFAULT_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";
    pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    // 日志查询分页
    pub const DEFAULT_LOG_LIMIT: u32 = 50;
    pub const MAX_LOG_LIMIT: u32 = 100;
    /// 未配置 MongoDB 时内存中保留的最大日志条数
    pub const DEFAULT_MEMORY_LOG_CAPACITY: usize = 10_000;

    // 持久化字段上限
    pub const MAX_USER_AGENT_LENGTH: usize = 500;
    pub const MAX_IP_ADDRESS_LENGTH: usize = 45;

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "bhashantar.toml",
        "config.toml",
        ".bhashantar.toml",
        "/etc/bhashantar/bhashantar.toml",
    ];

    // 环境变量文件，按优先级排列
    pub const ENV_FILES: &[&str] = &[".env.local", ".env.development", ".env.production", ".env"];
}
