use crate::criteria::SearchCriteria;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Criteria saved under a page or user key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub key: String,
    pub criteria: SearchCriteria,
    pub saved_at: DateTime<Utc>,
}

/// Record store for saved searches
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Insert or replace the criteria stored under `key`
    async fn save(&self, key: &str, criteria: &SearchCriteria) -> Result<SavedSearch>;

    async fn load(&self, key: &str) -> Result<Option<SavedSearch>>;

    async fn list(&self) -> Result<Vec<SavedSearch>>;

    /// Returns whether a record was removed
    async fn delete(&self, key: &str) -> Result<bool>;
}

/// All saved searches in one JSON object keyed by `key`
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<BTreeMap<String, SavedSearch>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) if json.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(json) => serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse {}", self.path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No saved searches at {} yet", self.path.display());
                Ok(BTreeMap::new())
            }
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        }
    }

    async fn write_all(&self, records: &BTreeMap<String, SavedSearch>) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[async_trait]
impl SearchStore for JsonFileStore {
    async fn save(&self, key: &str, criteria: &SearchCriteria) -> Result<SavedSearch> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await?;

        let saved = SavedSearch {
            key: key.to_string(),
            criteria: criteria.clone(),
            saved_at: Utc::now(),
        };
        records.insert(key.to_string(), saved.clone());
        self.write_all(&records).await?;

        info!("💾 Saved search '{}' to {}", key, self.path.display());
        Ok(saved)
    }

    async fn load(&self, key: &str) -> Result<Option<SavedSearch>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn list(&self) -> Result<Vec<SavedSearch>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.into_values().collect())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await?;
        if records.remove(key).is_none() {
            return Ok(false);
        }
        self.write_all(&records).await?;
        Ok(true)
    }
}
