//! # 翻译日志存储
//!
//! 记录成功的翻译及调用方信息，按创建时间倒序分页查询。配置了
//! MongoDB 时写入数据库，否则保存在进程内存中。

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use bson::doc;
use futures::stream::TryStreamExt;
use mongodb::{options::IndexOptions, Client, Collection, Database, IndexModel};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::types::{ClientInfo, TranslationLogDocument, TranslationLogEntry};
use crate::translation::config::constants::DEFAULT_MEMORY_LOG_CAPACITY;
use crate::translation::error::{helpers::persistence_error, Result};
use crate::translation::{BulkTranslation, TranslationError, TranslationResult};
use crate::web::config::MongoConfig;

#[derive(Debug, Clone)]
enum LogBackend {
    Mongo {
        db: Database,
        collection: Collection<TranslationLogDocument>,
    },
    Memory(Arc<RwLock<MemoryLog>>),
}

/// 进程内日志，超过容量时淘汰最早的条目
#[derive(Debug)]
struct MemoryLog {
    /// 追加顺序即创建顺序
    entries: VecDeque<TranslationLogEntry>,
    ids: HashSet<Uuid>,
    capacity: usize,
}

impl MemoryLog {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            ids: HashSet::new(),
            capacity: capacity.max(1),
        }
    }

    fn insert(&mut self, entries: Vec<TranslationLogEntry>) -> Result<()> {
        // translation_id 唯一；整批检查后再写入
        let mut batch = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if self.ids.contains(&entry.translation_id) || !batch.insert(entry.translation_id) {
                return Err(persistence_error(format!(
                    "duplicate translation_id: {}",
                    entry.translation_id
                )));
            }
        }

        for entry in entries {
            if self.entries.len() == self.capacity {
                if let Some(evicted) = self.entries.pop_front() {
                    self.ids.remove(&evicted.translation_id);
                }
            }
            self.ids.insert(entry.translation_id);
            self.entries.push_back(entry);
        }
        Ok(())
    }
}

/// 翻译日志存储
#[derive(Debug, Clone)]
pub struct TranslationLogStore {
    backend: LogBackend,
}

impl TranslationLogStore {
    /// 连接MongoDB并创建存储
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.connection_string).await?;
        let db = client.database(&config.database_name);
        tracing::info!(
            "翻译日志存储: MongoDB {}/{}",
            config.database_name,
            config.collection_name
        );
        Ok(Self::from_database(db, &config.collection_name))
    }

    pub fn from_database(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<TranslationLogDocument>(collection_name);
        Self {
            backend: LogBackend::Mongo { db, collection },
        }
    }

    /// 进程内存储，重启后数据丢失
    pub fn in_memory() -> Self {
        Self::in_memory_with_capacity(DEFAULT_MEMORY_LOG_CAPACITY)
    }

    /// 最多保留 `capacity` 条的进程内存储
    pub fn in_memory_with_capacity(capacity: usize) -> Self {
        Self {
            backend: LogBackend::Memory(Arc::new(RwLock::new(MemoryLog::new(capacity)))),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            LogBackend::Mongo { .. } => "mongodb",
            LogBackend::Memory(_) => "memory",
        }
    }

    /// 检查存储是否可用
    pub async fn ping(&self) -> Result<()> {
        match &self.backend {
            LogBackend::Mongo { db, .. } => {
                db.run_command(doc! { "ping": 1 }).await?;
                Ok(())
            }
            LogBackend::Memory(_) => Ok(()),
        }
    }

    /// 创建数据库索引
    pub async fn ensure_indexes(&self) -> Result<()> {
        let LogBackend::Mongo { collection, .. } = &self.backend else {
            return Ok(());
        };

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "translation_id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("translation_id_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(IndexOptions::builder().name("created_at_desc".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "target_language": 1 })
                .options(IndexOptions::builder().name("target_language_1".to_string()).build())
                .build(),
        ];

        collection
            .create_indexes(indexes)
            .await
            .map_err(|e| TranslationError::from(e).with_context("create translation log indexes"))?;

        tracing::info!("翻译日志索引已创建");
        Ok(())
    }

    /// 记录一次翻译
    pub async fn log_translation(
        &self,
        result: &TranslationResult,
        client: &ClientInfo,
    ) -> Result<TranslationLogEntry> {
        let entry = TranslationLogEntry::from_result(result, client);
        self.insert(vec![entry.clone()]).await?;
        tracing::debug!("已记录翻译: {}", entry.translation_id);
        Ok(entry)
    }

    /// 记录批量翻译中成功的条目，返回记录数量
    pub async fn log_bulk_translations(&self, bulk: &BulkTranslation, client: &ClientInfo) -> Result<usize> {
        let entries: Vec<TranslationLogEntry> = bulk
            .successful_results()
            .map(|result| TranslationLogEntry::from_result(result, client))
            .collect();

        if entries.is_empty() {
            return Ok(0);
        }

        let count = entries.len();
        self.insert(entries).await?;
        tracing::debug!("已记录批量翻译: {} 条", count);
        Ok(count)
    }

    /// 按创建时间倒序分页查询
    pub async fn get_translation_logs(&self, limit: u32, offset: u64) -> Result<Vec<TranslationLogEntry>> {
        match &self.backend {
            LogBackend::Mongo { collection, .. } => {
                let mut cursor = collection
                    .find(doc! {})
                    .sort(doc! { "created_at": -1 })
                    .skip(offset)
                    .limit(i64::from(limit))
                    .await?;

                let mut logs = Vec::new();
                while let Some(doc) = cursor.try_next().await? {
                    logs.push(doc.into_entry()?);
                }
                Ok(logs)
            }
            LogBackend::Memory(log) => {
                let log = log.read().await;
                let skip = usize::try_from(offset).unwrap_or(usize::MAX);
                Ok(log
                    .entries
                    .iter()
                    .rev()
                    .skip(skip)
                    .take(limit as usize)
                    .cloned()
                    .collect())
            }
        }
    }

    /// 已记录的日志数量
    pub async fn count(&self) -> Result<u64> {
        match &self.backend {
            LogBackend::Mongo { collection, .. } => Ok(collection.count_documents(doc! {}).await?),
            LogBackend::Memory(log) => Ok(log.read().await.entries.len() as u64),
        }
    }

    async fn insert(&self, entries: Vec<TranslationLogEntry>) -> Result<()> {
        match &self.backend {
            LogBackend::Mongo { collection, .. } => {
                let docs = entries
                    .iter()
                    .map(TranslationLogDocument::from_entry)
                    .collect::<Result<Vec<_>>>()?;
                collection.insert_many(docs).await?;
                Ok(())
            }
            LogBackend::Memory(log) => log.write().await.insert(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::TranslationService;

    fn client() -> ClientInfo {
        ClientInfo::new(Some("203.0.113.7".to_string()), Some("test-agent".to_string()))
    }

    #[tokio::test]
    async fn test_memory_store_newest_first() {
        let service = TranslationService::dictionary();
        let store = TranslationLogStore::in_memory();

        for text in ["hello", "goodbye", "yes"] {
            let result = service.translate(text, "hi").await.unwrap();
            store.log_translation(&result, &client()).await.unwrap();
        }

        let logs = store.get_translation_logs(2, 0).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].original_text, "yes");
        assert_eq!(logs[1].original_text, "goodbye");

        let logs = store.get_translation_logs(50, 2).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].original_text, "hello");
        assert_eq!(logs[0].ip_address.as_deref(), Some("203.0.113.7"));

        assert!(store.get_translation_logs(10, 99).await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_bulk_logs_only_successes() {
        let service = TranslationService::dictionary();
        let store = TranslationLogStore::in_memory();

        let bulk = service
            .translate_bulk(vec!["hello".into(), "  ".into(), "goodbye".into()], "ta")
            .await
            .unwrap();
        let logged = store.log_bulk_translations(&bulk, &ClientInfo::default()).await.unwrap();

        assert_eq!(logged, 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_translation_id_rejected() {
        let service = TranslationService::dictionary();
        let store = TranslationLogStore::in_memory();
        let result = service.translate("hello", "bn").await.unwrap();

        store.log_translation(&result, &client()).await.unwrap();
        let err = store.log_translation(&result, &client()).await.unwrap_err();
        assert_eq!(err.error_code(), "DB_LOG_ERROR");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_evicts_oldest_beyond_capacity() {
        let service = TranslationService::dictionary();
        let store = TranslationLogStore::in_memory_with_capacity(2);

        let first = service.translate("hello", "hi").await.unwrap();
        store.log_translation(&first, &client()).await.unwrap();
        for text in ["goodbye", "yes"] {
            let result = service.translate(text, "hi").await.unwrap();
            store.log_translation(&result, &client()).await.unwrap();
        }

        assert_eq!(store.count().await.unwrap(), 2);
        let logs = store.get_translation_logs(10, 0).await.unwrap();
        let texts: Vec<&str> = logs.iter().map(|log| log.original_text.as_str()).collect();
        assert_eq!(texts, vec!["yes", "goodbye"]);

        // 被淘汰条目的 id 不再占用
        store.log_translation(&first, &client()).await.unwrap();
        assert_eq!(store.get_translation_logs(1, 0).await.unwrap()[0].original_text, "hello");
    }

    #[tokio::test]
    async fn test_duplicate_within_batch_rejected_atomically() {
        let service = TranslationService::dictionary();
        let store = TranslationLogStore::in_memory();
        let result = service.translate("water", "ta").await.unwrap();
        let entry = TranslationLogEntry::from_result(&result, &client());

        let err = store.insert(vec![entry.clone(), entry]).await.unwrap_err();
        assert_eq!(err.error_code(), "DB_LOG_ERROR");
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_memory_backend_basics() {
        let store = TranslationLogStore::in_memory();
        assert_eq!(store.backend_name(), "memory");
        assert!(store.ping().await.is_ok());
        assert!(store.ensure_indexes().await.is_ok());
    }
}
