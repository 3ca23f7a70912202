//! Conversation history log
//!
//! The CSV store keeps one row per turn (`timestamp, utterance, intent,
//! response, language`). Writes replace the whole file and are not atomic.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use krishi_core::{HistoryStore, TurnRecord};

use crate::{csv_table, PersistenceError};

/// History log in a CSV file
#[derive(Debug, Clone)]
pub struct CsvHistoryStore {
    path: PathBuf,
}

impl CsvHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn most_recent(mut records: Vec<TurnRecord>, limit: usize) -> Vec<TurnRecord> {
    if records.len() > limit {
        records.drain(..records.len() - limit);
    }
    records
}

#[async_trait]
impl HistoryStore for CsvHistoryStore {
    async fn load(&self, limit: usize) -> krishi_core::Result<Vec<TurnRecord>> {
        let path = self.path.clone();
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(path = %path.display(), "No history log yet");
            return Ok(Vec::new());
        }

        let records = tokio::task::spawn_blocking(move || csv_table::read_rows::<TurnRecord>(&path))
            .await
            .map_err(PersistenceError::from)??;

        let records = most_recent(records, limit);
        tracing::info!(path = %self.path.display(), turns = records.len(), "Loaded conversation history");
        Ok(records)
    }

    async fn save(&self, records: &[TurnRecord]) -> krishi_core::Result<()> {
        let path = self.path.clone();
        let rows = records.to_vec();
        let count = rows.len();

        tokio::task::spawn_blocking(move || csv_table::write_rows(&path, &rows))
            .await
            .map_err(PersistenceError::from)??;

        tracing::debug!(path = %self.path.display(), turns = count, "Saved conversation history");
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "csv"
    }
}

/// History kept in memory only
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: Mutex<Vec<TurnRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<TurnRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Copy of everything saved so far
    pub async fn snapshot(&self) -> Vec<TurnRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self, limit: usize) -> krishi_core::Result<Vec<TurnRecord>> {
        Ok(most_recent(self.records.lock().await.clone(), limit))
    }

    async fn save(&self, records: &[TurnRecord]) -> krishi_core::Result<()> {
        *self.records.lock().await = records.to_vec();
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krishi_core::{Intent, Language};

    fn turns(n: usize) -> Vec<TurnRecord> {
        (0..n)
            .map(|i| {
                TurnRecord::now(
                    format!("utterance {}", i),
                    Intent::GetPrice,
                    format!("response {}", i),
                    Language::English,
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_csv_round_trip_keeps_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvHistoryStore::new(dir.path().join("conversation_history.csv"));

        assert!(store.load(100).await.unwrap().is_empty());

        let mut records = turns(5);
        records[4].intent = Intent::GetVarietyInfo;
        records[4].language = Language::Hindi;
        records[4].response = "गेहूं की प्रमुख किस्में:\n- HD 3086, with comma".into();
        store.save(&records).await.unwrap();

        let loaded = store.load(3).await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].utterance, "utterance 2");
        assert_eq!(loaded[2], records[4]);
    }

    #[tokio::test]
    async fn test_csv_header_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let store = CsvHistoryStore::new(&path);
        store.save(&turns(1)).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, "timestamp,utterance,intent,response,language");
        assert!(text.contains(",get_price,"));
        assert!(text.trim_end().ends_with(",english"));
    }

    #[tokio::test]
    async fn test_loads_zoneless_log_with_user_text_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversation_history.csv");
        std::fs::write(
            &path,
            "timestamp,user_text,intent,response,language\n\
             2025-09-10T14:03:22.123456,hello,greeting,Hello!,english\n\
             2025-09-10T14:04:01.5,गेहूं का भाव,get_price,कृपया एक स्थान निर्दिष्ट करें,hindi\n",
        )
        .unwrap();

        let loaded = CsvHistoryStore::new(&path).load(100).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].utterance, "hello");
        assert_eq!(loaded[1].intent, Intent::GetPrice);
        assert_eq!(loaded[1].language, Language::Hindi);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryHistoryStore::new();
        store.save(&turns(4)).await.unwrap();

        assert_eq!(store.snapshot().await.len(), 4);
        let loaded = store.load(2).await.unwrap();
        assert_eq!(loaded[0].utterance, "utterance 2");
        assert_eq!(store.backend_name(), "memory");
    }
}
