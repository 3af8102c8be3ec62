// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use std::sync::Arc;

use bhashantar::translation::{TranslationConfig, TranslationService};

/// 不可达的外部服务地址，用于触发连接错误
pub const UNREACHABLE_PROVIDER_URL: &str = "http://127.0.0.1:1/language/translate/v2";

/// 测试配置构建器
pub struct TestConfigBuilder {
    translation_config: TranslationConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            translation_config: TranslationConfig::default(),
        }
    }

    /// 使用外部服务模式，指向不可达的地址
    pub fn with_unreachable_provider(mut self) -> Self {
        self.translation_config = TranslationConfig {
            request_timeout_secs: 2,
            ..TranslationConfig::provider("test-key", Some(UNREACHABLE_PROVIDER_URL))
        };
        self
    }

    pub fn with_max_bulk_items(mut self, max: usize) -> Self {
        self.translation_config.max_bulk_items = max;
        self
    }

    pub fn with_max_text_length(mut self, max: usize) -> Self {
        self.translation_config.max_text_length = max;
        self
    }

    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.translation_config.max_concurrent_requests = max;
        self
    }

    pub fn build(self) -> TranslationConfig {
        self.translation_config
    }

    pub fn build_service(self) -> TranslationService {
        TranslationService::new(self.build()).expect("test config should be valid")
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 测试环境：共享的翻译服务
pub struct TestEnvironment {
    pub service: Arc<TranslationService>,
}

impl TestEnvironment {
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            service: Arc::new(TranslationService::new(config).expect("test config should be valid")),
        }
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new(TranslationConfig::default())
    }
}

/// HTTP 测试辅助工具
#[cfg(feature = "web")]
pub mod http {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use bhashantar::translation::{TranslationConfig, TranslationService};
    use bhashantar::web::{audit::TranslationLogStore, create_router, AppState, WebConfig};

    pub fn web_config() -> WebConfig {
        WebConfig {
            bind_addr: "127.0.0.1".to_string(),
            port: 8000,
            app_name: "Translation Microservice".to_string(),
            cors_origins: vec!["*".to_string()],
            mongo_config: None,
            memory_log_capacity: 1000,
        }
    }

    /// 使用内存日志存储构建路由器，同时返回存储以便检查
    pub fn test_app(config: TranslationConfig) -> (Router, TranslationLogStore) {
        let store = TranslationLogStore::in_memory();
        (test_app_with_store(config, store.clone()), store)
    }

    /// 使用指定的日志存储构建路由器
    pub fn test_app_with_store(config: TranslationConfig, store: TranslationLogStore) -> Router {
        let service = TranslationService::new(config).expect("test config should be valid");
        let state = Arc::new(AppState::new(service, store, "Translation Microservice"));
        create_router(state, &web_config())
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, json)
    }

    pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_json_with_headers(app, uri, body, &[]).await
    }

    pub async fn post_json_with_headers(
        app: &Router,
        uri: &str,
        body: Value,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .expect("request should build");
        send(app, request).await
    }

    pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build");
        send(app, request).await
    }

    pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build");
        send(app, request).await
    }
}
