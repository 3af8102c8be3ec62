//! HTTP 接口集成测试
//!
//! 使用内存日志存储驱动完整路由器，检查状态码、响应结构与日志记录

#![cfg(feature = "web")]

use axum::http::StatusCode;
use serde_json::json;

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use bhashantar::translation::TranslationConfig;
use bhashantar::web::{audit::TranslationLogStore, MongoConfig};
use common::http::{get_json, post_json, post_json_with_headers, post_raw, test_app, test_app_with_store};
use common::TestConfigBuilder;

#[tokio::test]
async fn test_service_info_and_health() {
    let (app, _) = test_app(TranslationConfig::default());

    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "Translation Microservice");
    assert_eq!(body["status"], "running");
    assert_eq!(body["health_check"], "/health");
    assert_eq!(body["mode"], "dictionary");

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["log_store"], "memory");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_translate_success_is_logged() {
    let (app, store) = test_app(TranslationConfig::default());

    let (status, body) = post_json_with_headers(
        &app,
        "/api/v1/translate",
        json!({"text": "hello", "target_language": "hi"}),
        &[("x-forwarded-for", "203.0.113.7, 10.0.0.1"), ("user-agent", "integration-test")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["original_text"], "hello");
    assert_eq!(body["translated_text"], "नमस्ते");
    assert_eq!(body["source_language"], "en");
    assert_eq!(body["target_language"], "hi");
    assert!(body.get("log_error").is_none());

    let logs = store.get_translation_logs(10, 0).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].translation_id.to_string(), body["translation_id"].as_str().unwrap());
    assert_eq!(logs[0].ip_address.as_deref(), Some("203.0.113.7"));
    assert_eq!(logs[0].user_agent.as_deref(), Some("integration-test"));
}

#[tokio::test]
async fn test_translate_validation_errors() {
    let (app, store) = test_app(TranslationConfig::default());

    let (status, body) = post_json(&app, "/api/v1/translate", json!({"text": "", "target_language": "hi"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Text cannot be empty");
    assert_eq!(body["error_code"], "VALIDATION_ERROR");

    let (status, body) = post_json(&app, "/api/v1/translate", json!({"text": "hello", "target_language": "xx"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Unsupported language code: xx");

    let (status, body) = post_json(&app, "/api/v1/translate", json!({"text": "hello"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");

    let (status, body) = post_raw(&app, "/api/v1/translate", "{not json").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);

    // 验证失败的请求不记录日志
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_text_length_limit_over_http() {
    let (app, _) = test_app(TestConfigBuilder::new().with_max_text_length(1000).build());

    let (status, _) = post_json(
        &app,
        "/api/v1/translate",
        json!({"text": "a".repeat(1000), "target_language": "ta"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        "/api/v1/translate",
        json!({"text": "a".repeat(1001), "target_language": "ta"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Text exceeds maximum length of 1000 characters");
}

#[tokio::test]
async fn test_bulk_translate_mixed_batch() {
    let (app, store) = test_app(TranslationConfig::default());

    let (status, body) = post_json(
        &app,
        "/api/v1/translate/bulk",
        json!({"texts": ["hello", "", "goodbye"], "target_language": "ta"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_translations"], 3);

    let items = body["translations"].as_array().unwrap();
    assert_eq!(items[0]["translated_text"], "வணக்கம்");
    assert_eq!(items[1]["success"], false);
    assert_eq!(items[1]["source_language"], "unknown");
    assert_eq!(items[1]["error"], "Text cannot be empty");
    assert_eq!(items[2]["translated_text"], "பிரியாவிடை");

    // 只记录成功的条目
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_bulk_request_level_errors() {
    let (app, _) = test_app(TranslationConfig::default());

    let (status, body) = post_json(&app, "/api/v1/translate/bulk", json!({"texts": [], "target_language": "hi"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Texts list cannot be empty");

    let texts: Vec<String> = (0..11).map(|i| format!("text {}", i)).collect();
    let (status, body) = post_json(&app, "/api/v1/translate/bulk", json!({"texts": texts, "target_language": "hi"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Maximum 10 texts allowed per bulk request");

    let (status, _) = post_json(&app, "/api/v1/translate/bulk", json!({"texts": ["hello"], "target_language": "zz"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_logs_pagination() {
    let (app, _) = test_app(TranslationConfig::default());

    for text in ["yes", "no", "water"] {
        let (status, _) = post_json(&app, "/api/v1/translate", json!({"text": text, "target_language": "kn"})).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get_json(&app, "/api/v1/translate/logs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 50);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["total_returned"], 3);
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs[0]["original_text"], "water");
    assert_eq!(logs[2]["original_text"], "yes");

    let (status, body) = get_json(&app, "/api/v1/translate/logs?limit=1&offset=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_returned"], 1);
    assert_eq!(body["logs"][0]["original_text"], "no");

    let (_, body) = get_json(&app, "/api/v1/translate/logs?offset=10").await;
    assert_eq!(body["total_returned"], 0);

    for query in ["limit=0", "limit=101", "offset=-1", "limit=abc"] {
        let (status, body) = get_json(&app, &format!("/api/v1/translate/logs?{}", query)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "query {}", query);
        assert_eq!(body["error_code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_languages_and_stats() {
    let (app, _) = test_app(TranslationConfig::default());

    let (status, body) = get_json(&app, "/api/v1/languages").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 24);
    assert_eq!(body["dictionary_entries"], 25);
    let hindi = body["languages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|lang| lang["code"] == "hi")
        .cloned()
        .unwrap();
    assert_eq!(hindi["dictionary"], true);

    post_json(&app, "/api/v1/translate", json!({"text": "quantum", "target_language": "fr"})).await;
    post_json(&app, "/api/v1/translate", json!({"text": "", "target_language": "fr"})).await;

    let (status, body) = get_json(&app, "/api/v1/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "dictionary");
    assert_eq!(body["total_requests"], 2);
    assert_eq!(body["successful_translations"], 1);
    assert_eq!(body["failed_translations"], 1);
    assert_eq!(body["dictionary_fallbacks"], 1);
    assert_eq!(body["logged_translations"], 1);
}

/// 指向不可达 MongoDB 的日志存储，服务器选择很快超时
async fn unreachable_log_store() -> TranslationLogStore {
    TranslationLogStore::connect(&MongoConfig {
        connection_string: "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200"
            .to_string(),
        database_name: "bhashantar_test".to_string(),
        collection_name: "translation_logs".to_string(),
    })
    .await
    .expect("client creation does not contact the server")
}

#[tokio::test]
async fn test_log_failure_still_returns_translation() {
    let app = test_app_with_store(TranslationConfig::default(), unreachable_log_store().await);

    let (status, body) = post_json(&app, "/api/v1/translate", json!({"text": "hello", "target_language": "hi"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["translated_text"], "नमस्ते");
    assert!(body["log_error"].as_str().unwrap().starts_with("Failed to log translation"));

    let (status, body) = post_json(
        &app,
        "/api/v1/translate/bulk",
        json!({"texts": ["yes", "no"], "target_language": "bn"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_translations"], 2);
    assert!(body["log_error"].is_string());

    let (status, body) = get_json(&app, "/api/v1/translate/logs").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], "LOG_RETRIEVAL_ERROR");

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["log_store"], "mongodb");
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = test_app(TranslationConfig::default());
    let (status, _) = get_json(&app, "/api/v2/translate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
