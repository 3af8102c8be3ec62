//! # 翻译日志类型定义

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::translation::config::constants::{MAX_IP_ADDRESS_LENGTH, MAX_USER_AGENT_LENGTH};
use crate::translation::error::{helpers::persistence_error, Result};
use crate::translation::TranslationResult;

/// 调用方信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// 创建调用方信息，超长字段按字符截断
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address: ip_address.map(|ip| truncate_chars(ip, MAX_IP_ADDRESS_LENGTH)),
            user_agent: user_agent.map(|ua| truncate_chars(ua, MAX_USER_AGENT_LENGTH)),
        }
    }
}

fn truncate_chars(value: String, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value,
    }
}

/// 一条翻译日志
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationLogEntry {
    pub id: String,
    pub translation_id: Uuid,
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub created_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl TranslationLogEntry {
    /// 从翻译结果创建日志条目
    pub fn from_result(result: &TranslationResult, client: &ClientInfo) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            translation_id: result.translation_id,
            original_text: result.original_text.clone(),
            translated_text: result.translated_text.clone(),
            source_language: result.source_language.clone(),
            target_language: result.target_language.to_string(),
            created_at: Utc::now(),
            user_agent: client.user_agent.clone(),
            ip_address: client.ip_address.clone(),
        }
    }
}

/// MongoDB中存储的翻译日志
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationLogDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub translation_id: String,
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub created_at: bson::DateTime,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl TranslationLogDocument {
    pub fn from_entry(entry: &TranslationLogEntry) -> Result<Self> {
        let id = ObjectId::parse_str(&entry.id)
            .map_err(|e| persistence_error(format!("invalid log id {}: {}", entry.id, e)))?;

        Ok(Self {
            id,
            translation_id: entry.translation_id.to_string(),
            original_text: entry.original_text.clone(),
            translated_text: entry.translated_text.clone(),
            source_language: entry.source_language.clone(),
            target_language: entry.target_language.clone(),
            created_at: bson::DateTime::from_chrono(entry.created_at),
            user_agent: entry.user_agent.clone(),
            ip_address: entry.ip_address.clone(),
        })
    }

    pub fn into_entry(self) -> Result<TranslationLogEntry> {
        let translation_id = Uuid::parse_str(&self.translation_id).map_err(|e| {
            persistence_error(format!("invalid translation_id {}: {}", self.translation_id, e))
        })?;

        Ok(TranslationLogEntry {
            id: self.id.to_hex(),
            translation_id,
            original_text: self.original_text,
            translated_text: self.translated_text,
            source_language: self.source_language,
            target_language: self.target_language,
            created_at: self.created_at.to_chrono(),
            user_agent: self.user_agent,
            ip_address: self.ip_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::LanguageCode;

    fn sample_result() -> TranslationResult {
        TranslationResult {
            success: true,
            original_text: "hello".to_string(),
            translated_text: "नमस्ते".to_string(),
            source_language: "en".to_string(),
            target_language: LanguageCode::Hi,
            translation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            error: None,
        }
    }

    #[test]
    fn test_client_info_truncates_by_chars() {
        let client = ClientInfo::new(Some("1".repeat(60)), Some("ü".repeat(600)));
        assert_eq!(client.ip_address.unwrap().chars().count(), MAX_IP_ADDRESS_LENGTH);
        assert_eq!(client.user_agent.unwrap().chars().count(), MAX_USER_AGENT_LENGTH);

        let client = ClientInfo::new(Some("10.0.0.1".to_string()), None);
        assert_eq!(client.ip_address.as_deref(), Some("10.0.0.1"));
        assert!(client.user_agent.is_none());
    }

    #[test]
    fn test_document_conversion_preserves_fields() {
        let client = ClientInfo::new(Some("127.0.0.1".to_string()), Some("curl/8.0".to_string()));
        let entry = TranslationLogEntry::from_result(&sample_result(), &client);
        let doc = TranslationLogDocument::from_entry(&entry).unwrap();
        let back = doc.into_entry().unwrap();

        assert_eq!(back.id, entry.id);
        assert_eq!(back.translation_id, entry.translation_id);
        assert_eq!(back.target_language, "hi");
        assert_eq!(back.ip_address.as_deref(), Some("127.0.0.1"));
        // BSON 时间精度为毫秒
        assert_eq!(
            back.created_at.timestamp_millis(),
            entry.created_at.timestamp_millis()
        );
    }
}
