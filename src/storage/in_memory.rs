//! In-memory implementation of ConfigurationStore for testing and development

use crate::core::{Configuration, ConfigurationStore, StoredConfiguration};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory configuration store
///
/// Records live in an insertion-ordered `Vec`. Uses RwLock for thread-safe
/// access; clones share the same records.
#[derive(Clone, Default)]
pub struct InMemoryConfigurationStore {
    records: Arc<RwLock<Vec<StoredConfiguration>>>,
}

impl InMemoryConfigurationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored record, oldest first
    pub fn snapshot(&self) -> Result<Vec<StoredConfiguration>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.clone())
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryConfigurationStore {
    async fn insert(&self, configuration: Configuration) -> Result<StoredConfiguration> {
        let record = StoredConfiguration::new(configuration);

        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        records.push(record.clone());

        Ok(record)
    }

    async fn page(&self, offset: usize, limit: usize) -> Result<Vec<StoredConfiguration>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.len())
    }
}
