//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。每个变量声明名称、默认值和
//! 说明，并在 `parse` 中完成取值校验。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }

    /// 变量是否在环境中显式设置
    fn is_set() -> bool {
        env::var_os(Self::NAME).is_some()
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 应用运行模式
    pub struct Mode;
    impl EnvVar<String> for Mode {
        const NAME: &'static str = "BHASHANTAR_MODE";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("production".to_string()),
            }
        }
        const DESCRIPTION: &'static str =
            "Application mode: development (debug logging by default), staging, production";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "development" | "dev" => Ok("development".to_string()),
                "staging" | "stage" => Ok("staging".to_string()),
                "production" | "prod" => Ok("production".to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid mode '{}'. Use: development, staging, production", value),
                }),
            }
        }
    }

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "BHASHANTAR_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid log level '{}'. Use: trace, debug, info, warn, error", value),
                }),
            }
        }
    }

    /// 实际使用的日志级别
    ///
    /// 显式设置的 `BHASHANTAR_LOG_LEVEL` 优先，否则由运行模式决定。
    pub fn effective_log_level() -> EnvResult<String> {
        let explicit = if LogLevel::is_set() { Some(LogLevel::get()?) } else { None };
        Ok(log_level_for_mode(&Mode::get()?, explicit))
    }

    /// 开发模式默认 debug，其余模式默认 info
    pub fn log_level_for_mode(mode: &str, explicit: Option<String>) -> String {
        explicit.unwrap_or_else(|| match mode {
            "development" => "debug".to_string(),
            _ => "info".to_string(),
        })
    }

    /// 服务名称
    pub struct AppName;
    impl EnvVar<String> for AppName {
        const NAME: &'static str = "BHASHANTAR_APP_NAME";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("Translation Microservice".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Service name reported by the root and health endpoints";

        fn parse(value: &str) -> EnvResult<String> {
            let name = value.trim();
            if name.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Service name cannot be empty".to_string(),
                });
            }
            Ok(name.to_string())
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 使用内置词典（不调用外部翻译服务）
    pub struct UseMock;
    impl EnvVar<bool> for UseMock {
        const NAME: &'static str = "BHASHANTAR_USE_MOCK_TRANSLATION";
        const DEFAULT: Option<bool> = Some(true);
        const DESCRIPTION: &'static str = "Use the built-in dictionary instead of the external provider";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 外部翻译服务API密钥
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "GOOGLE_TRANSLATE_API_KEY";
        const DEFAULT: Option<String> = None; // 无默认值，提供者模式下必须设置
        const DESCRIPTION: &'static str = "Google Cloud Translation API key";

        fn parse(value: &str) -> EnvResult<String> {
            let key = value.trim();
            if key.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key cannot be empty".to_string(),
                });
            }
            Ok(key.to_string())
        }
    }

    /// API URL
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "BHASHANTAR_TRANSLATION_API_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::config::constants::DEFAULT_API_URL.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Translation provider endpoint URL";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API URL must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// 单条文本最大字符数
    pub struct MaxTextLength;
    impl EnvVar<usize> for MaxTextLength {
        const NAME: &'static str = "BHASHANTAR_MAX_TEXT_LENGTH";
        const DEFAULT: Option<usize> = Some(1000);
        const DESCRIPTION: &'static str = "Maximum characters per text";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 100_000)
        }
    }

    /// 批量请求最大条目数
    pub struct MaxBulkItems;
    impl EnvVar<usize> for MaxBulkItems {
        const NAME: &'static str = "BHASHANTAR_MAX_BULK_ITEMS";
        const DEFAULT: Option<usize> = Some(10);
        const DESCRIPTION: &'static str = "Maximum texts per bulk request";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 1000)
        }
    }

    /// 外部请求超时
    pub struct RequestTimeout;
    impl EnvVar<Duration> for RequestTimeout {
        const NAME: &'static str = "BHASHANTAR_REQUEST_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(10));
        const DESCRIPTION: &'static str = "Provider request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_seconds(value, Self::NAME, 1, 300)
        }
    }

    /// 最大并发请求数
    pub struct MaxConcurrentRequests;
    impl EnvVar<usize> for MaxConcurrentRequests {
        const NAME: &'static str = "BHASHANTAR_MAX_CONCURRENT_REQUESTS";
        const DEFAULT: Option<usize> = Some(4);
        const DESCRIPTION: &'static str = "Maximum concurrent provider requests within a bulk request";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 100)
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "BHASHANTAR_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("0.0.0.0".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Web server bind address";

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "BHASHANTAR_WEB_PORT";
        const DEFAULT: Option<u16> = Some(8000);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                });
            }

            Ok(port)
        }
    }

    /// CORS允许的源
    pub struct CorsOrigins;
    impl EnvVar<Vec<String>> for CorsOrigins {
        const NAME: &'static str = "BHASHANTAR_CORS_ORIGINS";
        const DEFAULT: Option<Vec<String>> = None;

        fn get() -> EnvResult<Vec<String>> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(vec!["*".to_string()]),
            }
        }
        const DESCRIPTION: &'static str = "CORS allowed origins (comma-separated, '*' for any)";

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            Ok(value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect())
        }
    }
}

/// MongoDB相关环境变量
pub mod mongodb {
    use super::*;

    /// 未配置 MongoDB 时内存日志的容量
    pub struct MemoryLogCapacity;
    impl EnvVar<usize> for MemoryLogCapacity {
        const NAME: &'static str = "BHASHANTAR_MEMORY_LOG_CAPACITY";
        const DEFAULT: Option<usize> =
            Some(crate::translation::config::constants::DEFAULT_MEMORY_LOG_CAPACITY);
        const DESCRIPTION: &'static str =
            "Maximum translation logs kept in memory when MONGODB_URL is unset (oldest evicted first)";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 1_000_000)
        }
    }

    /// MongoDB连接字符串，未设置时翻译日志只保存在内存中
    pub struct ConnectionString;
    impl EnvVar<String> for ConnectionString {
        const NAME: &'static str = "MONGODB_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "MongoDB connection string (translation logs stay in memory when unset)";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "MongoDB URL must start with mongodb:// or mongodb+srv://".to_string(),
                })
            }
        }
    }

    /// 数据库名称
    pub struct DatabaseName;
    impl EnvVar<String> for DatabaseName {
        const NAME: &'static str = "MONGODB_DATABASE";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("bhashantar".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "MongoDB database name";

        fn parse(value: &str) -> EnvResult<String> {
            parse_name(value, Self::NAME, "Database name")
        }
    }

    /// 集合名称
    pub struct CollectionName;
    impl EnvVar<String> for CollectionName {
        const NAME: &'static str = "MONGODB_COLLECTION";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("translation_logs".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "MongoDB collection for translation logs";

        fn parse(value: &str) -> EnvResult<String> {
            parse_name(value, Self::NAME, "Collection name")
        }
    }
}

/// 辅助函数
fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

fn parse_seconds(value: &str, var_name: &str, min: u64, max: u64) -> EnvResult<Duration> {
    let seconds: u64 = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid number of seconds".to_string(),
    })?;

    if seconds < min || seconds > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Timeout must be between {} and {} seconds", min, max),
        });
    }

    Ok(Duration::from_secs(seconds))
}

fn parse_name(value: &str, var_name: &str, what: &str) -> EnvResult<String> {
    let name = value.trim();
    if name.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("{} cannot be empty", what),
        });
    }
    Ok(name.to_string())
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    fn line<T: fmt::Debug>(docs: &mut String, name: &str, description: &str, default: Option<T>) {
        docs.push_str(&format!("- `{}`: {} (default: {:?})\n", name, description, default));
    }

    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    line(&mut docs, core::Mode::NAME, core::Mode::DESCRIPTION, Some("production"));
    line(
        &mut docs,
        core::LogLevel::NAME,
        core::LogLevel::DESCRIPTION,
        Some("info (debug in development mode)"),
    );
    line(&mut docs, core::AppName::NAME, core::AppName::DESCRIPTION, Some("Translation Microservice"));

    docs.push_str("\n## Translation Configuration\n\n");
    line(&mut docs, translation::UseMock::NAME, translation::UseMock::DESCRIPTION, translation::UseMock::DEFAULT);
    line(&mut docs, translation::ApiKey::NAME, translation::ApiKey::DESCRIPTION, translation::ApiKey::DEFAULT);
    line(
        &mut docs,
        translation::ApiUrl::NAME,
        translation::ApiUrl::DESCRIPTION,
        Some(crate::translation::config::constants::DEFAULT_API_URL),
    );
    line(
        &mut docs,
        translation::MaxTextLength::NAME,
        translation::MaxTextLength::DESCRIPTION,
        translation::MaxTextLength::DEFAULT,
    );
    line(
        &mut docs,
        translation::MaxBulkItems::NAME,
        translation::MaxBulkItems::DESCRIPTION,
        translation::MaxBulkItems::DEFAULT,
    );
    line(
        &mut docs,
        translation::RequestTimeout::NAME,
        translation::RequestTimeout::DESCRIPTION,
        translation::RequestTimeout::DEFAULT,
    );
    line(
        &mut docs,
        translation::MaxConcurrentRequests::NAME,
        translation::MaxConcurrentRequests::DESCRIPTION,
        translation::MaxConcurrentRequests::DEFAULT,
    );

    docs.push_str("\n## Web Server Configuration\n\n");
    line(&mut docs, web::BindAddress::NAME, web::BindAddress::DESCRIPTION, Some("0.0.0.0"));
    line(&mut docs, web::Port::NAME, web::Port::DESCRIPTION, web::Port::DEFAULT);
    line(&mut docs, web::CorsOrigins::NAME, web::CorsOrigins::DESCRIPTION, Some("*"));

    docs.push_str("\n## MongoDB Configuration\n\n");
    line(
        &mut docs,
        mongodb::ConnectionString::NAME,
        mongodb::ConnectionString::DESCRIPTION,
        mongodb::ConnectionString::DEFAULT,
    );
    line(&mut docs, mongodb::DatabaseName::NAME, mongodb::DatabaseName::DESCRIPTION, Some("bhashantar"));
    line(
        &mut docs,
        mongodb::MemoryLogCapacity::NAME,
        mongodb::MemoryLogCapacity::DESCRIPTION,
        mongodb::MemoryLogCapacity::DEFAULT,
    );
    line(
        &mut docs,
        mongodb::CollectionName::NAME,
        mongodb::CollectionName::DESCRIPTION,
        Some("translation_logs"),
    );

    docs
}
