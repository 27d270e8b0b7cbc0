//! Storage trait for configuration records

use crate::core::draft::{Configuration, StoredConfiguration};
use anyhow::Result;
use async_trait::async_trait;

/// Append-only store of configuration requests
///
/// Implementations assign the identifier and timestamps on insert and keep
/// records in insertion order, which is the order pages are served in. The
/// server is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Persist a validated configuration
    async fn insert(&self, configuration: Configuration) -> Result<StoredConfiguration>;

    /// Up to `limit` records starting at `offset`, oldest first
    ///
    /// An offset past the end yields an empty page, not an error.
    async fn page(&self, offset: usize, limit: usize) -> Result<Vec<StoredConfiguration>>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;
}
