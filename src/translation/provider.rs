//! 外部翻译服务客户端
//!
//! 调用 Google Cloud Translation v2 REST 接口。客户端内部持有一个连接池，
//! 可在所有请求之间共享。

use serde::{Deserialize, Serialize};

use crate::translation::config::TranslationConfig;
use crate::translation::error::{helpers::provider_error, Result};
use crate::translation::language::LanguageCode;

/// Google Cloud 接口的密钥请求头
pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<ProviderTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderTranslation {
    translated_text: String,
    detected_source_language: Option<String>,
}

/// 外部服务的翻译结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOutput {
    pub translated_text: String,
    /// 服务检测到的源语言；请求中指定源语言时服务不会返回
    pub source_language: String,
}

/// Google 翻译客户端
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GoogleTranslateProvider {
    /// 根据配置创建客户端，请求超时取自配置
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| provider_error("API key not configured"))?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// 翻译一段文本
    pub async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
        source: Option<LanguageCode>,
    ) -> Result<ProviderOutput> {
        let body = TranslateRequest {
            q: text,
            target: target.as_str(),
            format: "text",
            source: source.as_ref().map(LanguageCode::as_str),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        // 先按文本读取，解析失败时仍能保留服务返回的错误信息
        let payload = response.text().await?;

        if !status.is_success() {
            return Err(provider_error(extract_error_message(status, &payload)));
        }

        let parsed: TranslateResponse = serde_json::from_str(&payload)?;
        let translation = parsed
            .data
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| provider_error("provider returned no translations"))?;

        let source_language = translation
            .detected_source_language
            .or_else(|| source.map(|code| code.as_str().to_string()))
            .unwrap_or_else(|| "unknown".to_string());

        tracing::debug!("外部翻译完成: {} → {}", source_language, target);

        Ok(ProviderOutput {
            translated_text: translation.translated_text,
            source_language,
        })
    }
}

/// 从错误响应中提取消息，无法解析时保留原始正文
fn extract_error_message(status: reqwest::StatusCode, payload: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(payload)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| payload.trim().chars().take(200).collect());

    format!("HTTP {}: {}", status.as_u16(), message)
}
