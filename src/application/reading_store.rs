// Repository trait for the hosted tabular reading store
use crate::domain::temperature::{StoredReading, TemperatureReading};
use async_trait::async_trait;

/// One fetched page plus the store's exact total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingPage {
    pub rows: Vec<StoredReading>,
    pub total: usize,
}

#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Mirror one reading into the store. Failures are the caller's to
    /// log; they must never block the local display update.
    async fn insert(&self, reading: &TemperatureReading) -> anyhow::Result<()>;

    /// Fetch one page ordered by descending insertion time, using the
    /// shared range convention (`offset = (page-1)*page_size`,
    /// `limit = page_size`).
    async fn fetch_page(&self, offset: usize, limit: usize) -> anyhow::Result<ReadingPage>;
}
