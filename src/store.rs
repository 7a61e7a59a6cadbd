//! Durable portfolio selection store
//!
//! Persists the set of starred coin IDs as a JSON file. Every mutation
//! writes the file and then re-reads it to refresh the in-memory list;
//! there is no in-memory-only fast path. Cardinality is at most a few
//! hundred entries, so the full rewrite per mutation is acceptable.

use crate::{error::StoreError, types::PortfolioSelection};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// On-device store of portfolio selections
pub struct SelectionStore {
    path: PathBuf,
    selections: RwLock<Vec<PortfolioSelection>>,
}

impl SelectionStore {
    /// Opens the store at `path`, loading any existing selections
    ///
    /// A missing file is an empty portfolio, not an error.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let selections = Self::read_file(&path).await?;

        tracing::debug!(count = selections.len(), path = %path.display(), "Loaded portfolio");

        Ok(Self {
            path,
            selections: RwLock::new(selections),
        })
    }

    async fn read_file(path: &Path) -> Result<Vec<PortfolioSelection>, StoreError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Persists `selections` to disk, then re-reads the file into memory
    async fn persist_and_reload(
        &self,
        selections: &mut Vec<PortfolioSelection>,
    ) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&*selections)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        tokio::fs::write(&self.path, bytes).await?;

        *selections = Self::read_file(&self.path).await?;
        Ok(())
    }

    /// Stars a coin. Idempotent: an already-present ID leaves exactly one
    /// entry.
    pub async fn add(&self, coin_id: &str) -> Result<(), StoreError> {
        let mut selections = self.selections.write().await;

        if selections.iter().any(|s| s.coin_id == coin_id) {
            return Ok(());
        }

        selections.push(PortfolioSelection::new(coin_id));
        self.persist_and_reload(&mut selections).await?;

        tracing::debug!(coin_id, "Added coin to portfolio");
        Ok(())
    }

    /// Unstars a coin. Best-effort: a missing ID is a no-op.
    pub async fn remove(&self, coin_id: &str) -> Result<(), StoreError> {
        let mut selections = self.selections.write().await;

        let before = selections.len();
        selections.retain(|s| s.coin_id != coin_id);
        if selections.len() == before {
            return Ok(());
        }

        self.persist_and_reload(&mut selections).await?;

        tracing::debug!(coin_id, "Removed coin from portfolio");
        Ok(())
    }

    /// All selections in insertion order
    pub async fn list(&self) -> Vec<PortfolioSelection> {
        self.selections.read().await.clone()
    }

    /// The starred coin IDs as a set
    pub async fn ids(&self) -> HashSet<String> {
        self.selections
            .read()
            .await
            .iter()
            .map(|s| s.coin_id.clone())
            .collect()
    }

    /// Whether a coin is currently starred
    pub async fn contains(&self, coin_id: &str) -> bool {
        self.selections
            .read()
            .await
            .iter()
            .any(|s| s.coin_id == coin_id)
    }
}
