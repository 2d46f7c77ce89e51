//! Snooze store abstraction and in-memory implementation

use super::models::*;
use crate::error::{Result, SnoozeError};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Snooze store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnoozeStoreConfig {
    #[serde(default = "default_collection")]
    pub collection_name: String,
    #[serde(default = "default_list_limit")]
    pub default_list_limit: usize,
    #[serde(default = "default_max_list_limit")]
    pub max_list_limit: usize,
}

fn default_collection() -> String { "snoozes".to_string() }
fn default_list_limit() -> usize { 50 }
fn default_max_list_limit() -> usize { 200 }

impl Default for SnoozeStoreConfig {
    fn default() -> Self {
        Self {
            collection_name: default_collection(),
            default_list_limit: default_list_limit(),
            max_list_limit: default_max_list_limit(),
        }
    }
}

impl SnoozeStoreConfig {
    /// Resolve a requested list size: unset means the default, zero or
    /// oversized requests are clamped into `[1, max_list_limit]`
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_list_limit)
            .clamp(1, self.max_list_limit.max(1))
    }
}

/// Document store for snoozed notifications
#[async_trait]
pub trait SnoozeStore: Send + Sync {
    /// Create or overwrite a record; returns its id
    async fn upsert(&self, request: SnoozeStoreRequest) -> Result<String>;

    /// Records ordered by `snooze_until`, latest first
    async fn list(&self, limit: usize) -> Result<Vec<SnoozeRecord>>;

    /// Apply a partial update; unknown ids are an error unless the update is empty
    async fn update(&self, id: &str, update: SnoozeUpdate) -> Result<String>;

    /// Delete a record; deleting an unknown id succeeds
    async fn delete(&self, id: &str) -> Result<String>;
}

/// Process-local store used when no document database is configured
pub struct InMemorySnoozeStore {
    records: DashMap<String, SnoozeRecord>,
    config: SnoozeStoreConfig,
}

impl InMemorySnoozeStore {
    pub fn new(config: SnoozeStoreConfig) -> Self {
        info!("Using in-memory snooze store for collection: {}", config.collection_name);
        Self {
            records: DashMap::new(),
            config,
        }
    }

}

impl Default for InMemorySnoozeStore {
    fn default() -> Self {
        Self::new(SnoozeStoreConfig::default())
    }
}

#[async_trait]
impl SnoozeStore for InMemorySnoozeStore {
    async fn upsert(&self, request: SnoozeStoreRequest) -> Result<String> {
        if request.id.trim().is_empty() {
            return Err(SnoozeError::Validation("id cannot be empty".to_string()));
        }

        let now = Utc::now();
        let id = request.id.clone();
        let mut record = request.into_record(now);

        debug!("Storing snooze: id={}", id);
        // Overwrites keep the original creation time
        match self.records.entry(id.clone()) {
            Entry::Occupied(mut existing) => {
                record.created_at = existing.get().created_at;
                existing.insert(record);
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
        Ok(id)
    }

    async fn list(&self, limit: usize) -> Result<Vec<SnoozeRecord>> {
        let mut items: Vec<SnoozeRecord> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        items.sort_by(|a, b| b.snooze_until.cmp(&a.snooze_until));
        items.truncate(limit.min(self.config.max_list_limit));
        Ok(items)
    }

    async fn update(&self, id: &str, update: SnoozeUpdate) -> Result<String> {
        if update.is_empty() {
            return Ok(id.to_string());
        }

        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| SnoozeError::NotFound(id.to_string()))?;

        update.apply(&mut record, Utc::now());
        debug!("Updated snooze: id={}", id);
        Ok(id.to_string())
    }

    async fn delete(&self, id: &str) -> Result<String> {
        if self.records.remove(id).is_some() {
            debug!("Deleted snooze: id={}", id);
        }
        Ok(id.to_string())
    }
}
