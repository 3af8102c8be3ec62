//! Web 服务器模块
//!
//! 通过 HTTP 提供翻译服务、批量翻译与翻译日志查询

pub mod audit;
pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::translation::error::{helpers::internal_error, Result};
use crate::translation::{TranslationConfig, TranslationService};
use crate::web::audit::TranslationLogStore;

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    translation_config: TranslationConfig,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, translation_config: TranslationConfig) -> Self {
        Self {
            config,
            translation_config,
        }
    }

    /// 构建应用状态：翻译服务与日志存储
    pub async fn build_state(&self) -> Result<AppState> {
        let service = TranslationService::new(self.translation_config.clone())?;

        let log_store = match &self.config.mongo_config {
            Some(mongo_config) => {
                let store = TranslationLogStore::connect(mongo_config)
                    .await
                    .map_err(|e| e.with_context("connect translation log store"))?;
                // 数据库暂时不可用时仍然启动，健康检查会报告降级
                if let Err(e) = store.ensure_indexes().await {
                    tracing::warn!("创建翻译日志索引失败: {}", e);
                }
                store
            }
            None => {
                tracing::warn!(
                    "未配置 MONGODB_URL，翻译日志仅保存在内存中（最多 {} 条）",
                    self.config.memory_log_capacity
                );
                TranslationLogStore::in_memory_with_capacity(self.config.memory_log_capacity)
            }
        };

        Ok(AppState::new(service, log_store, self.config.app_name.clone()))
    }

    /// 启动 Web 服务器，收到 Ctrl-C 后优雅退出
    pub async fn start(&self) -> Result<()> {
        let app_state = Arc::new(self.build_state().await?);
        let app = create_router(app_state, &self.config);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address())
            .await
            .map_err(|e| internal_error(format!("Failed to bind server: {}", e)))?;

        tracing::info!(
            "Web server starting at http://{} ({} mode)",
            self.config.listen_address(),
            self.translation_config.mode()
        );

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| internal_error(format!("Server error: {}", e)))?;

        tracing::info!("Web server stopped");
        Ok(())
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    create_routes()
        .with_state(app_state)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &WebConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("忽略无效的 CORS 源: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听 Ctrl-C 信号: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("收到退出信号，正在关闭服务器");
}
