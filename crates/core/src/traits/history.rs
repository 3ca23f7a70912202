//! Conversation history storage

use async_trait::async_trait;

use crate::{Result, TurnRecord};

/// Durable log of completed turns
///
/// Saving replaces the stored log with the given records; loading returns at
/// most `limit` of the most recent records, oldest first.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn load(&self, limit: usize) -> Result<Vec<TurnRecord>>;

    async fn save(&self, records: &[TurnRecord]) -> Result<()>;

    /// Get backend name for logging
    fn backend_name(&self) -> &str;
}
