//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use crate::env::{EnvError, EnvResult, EnvVar};
use crate::translation::config::constants::DEFAULT_MEMORY_LOG_CAPACITY;

/// MongoDB 配置
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// MongoDB 连接字符串
    pub connection_string: String,
    /// 数据库名称
    pub database_name: String,
    /// 集合名称
    pub collection_name: String,
}

impl MongoConfig {
    /// 从环境变量创建配置，未设置 `MONGODB_URL` 时返回 `None`
    pub fn from_env() -> EnvResult<Option<Self>> {
        use crate::env::mongodb;

        if !mongodb::ConnectionString::is_set() {
            return Ok(None);
        }

        Ok(Some(Self {
            connection_string: mongodb::ConnectionString::get()?,
            database_name: mongodb::DatabaseName::get()?,
            collection_name: mongodb::CollectionName::get()?,
        }))
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.connection_string.is_empty() {
            return Err(EnvError {
                variable: "MONGODB_URL".to_string(),
                message: "Connection string cannot be empty".to_string(),
            });
        }

        if self.database_name.is_empty() {
            return Err(EnvError {
                variable: "MONGODB_DATABASE".to_string(),
                message: "Database name cannot be empty".to_string(),
            });
        }

        if self.collection_name.is_empty() {
            return Err(EnvError {
                variable: "MONGODB_COLLECTION".to_string(),
                message: "Collection name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// 服务名称
    pub app_name: String,
    /// CORS 允许的源，包含 "*" 时允许任意源
    pub cors_origins: Vec<String>,
    /// MongoDB 配置，未配置时翻译日志保存在内存中
    pub mongo_config: Option<MongoConfig>,
    /// 内存日志的最大条数
    pub memory_log_capacity: usize,
}

impl WebConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::{core, mongodb, web};

        Ok(Self {
            bind_addr: web::BindAddress::get()?,
            port: web::Port::get()?,
            app_name: core::AppName::get()?,
            cors_origins: web::CorsOrigins::get()?,
            mongo_config: MongoConfig::from_env()?,
            memory_log_capacity: mongodb::MemoryLogCapacity::get()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.bind_addr.is_empty() {
            return Err(EnvError {
                variable: "BHASHANTAR_WEB_BIND_ADDRESS".to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        if self.port == 0 {
            return Err(EnvError {
                variable: "BHASHANTAR_WEB_PORT".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.memory_log_capacity == 0 {
            return Err(EnvError {
                variable: "BHASHANTAR_MEMORY_LOG_CAPACITY".to_string(),
                message: "Memory log capacity cannot be 0".to_string(),
            });
        }

        if let Some(ref mongo_config) = self.mongo_config {
            mongo_config.validate()?;
        }

        Ok(())
    }

    /// 获取完整的监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// 是否允许任意来源
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|origin| origin == "*")
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Failed to load web config from environment: {}. Using defaults.", e);
            Self {
                bind_addr: "0.0.0.0".to_string(),
                port: 8000,
                app_name: "Translation Microservice".to_string(),
                cors_origins: vec!["*".to_string()],
                mongo_config: None,
                memory_log_capacity: DEFAULT_MEMORY_LOG_CAPACITY,
            }
        })
    }
}
