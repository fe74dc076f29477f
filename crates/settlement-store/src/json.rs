//! JSON file storage.
//!
//! Each collection is one pretty-printed JSON array in the data directory:
//!
//! ```text
//! <data_dir>/
//!   settlements.json   settlements with districts, residents, ledgers
//!   districts.json     the blueprint catalog
//!   spears.json        spears of every settlement
//! ```
//!
//! Field names are the struct field names. Kind-keyed maps such as a
//! blueprint's `daily_output` are objects keyed by the kind's variant name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use settlement_types::{Blueprint, Settlement, Spear};

use crate::error::StoreError;
use crate::repository::Repository;

/// Default file name of the settlement collection.
pub const DEFAULT_SETTLEMENTS_FILE: &str = "settlements.json";

/// Default file name of the blueprint catalog.
pub const DEFAULT_DISTRICTS_FILE: &str = "districts.json";

/// Default file name of the spear collection.
pub const DEFAULT_SPEARS_FILE: &str = "spears.json";

/// [`Repository`] backed by JSON files under one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileRepository {
    settlements_path: PathBuf,
    blueprints_path: PathBuf,
    spears_path: PathBuf,
}

impl JsonFileRepository {
    /// Store under `data_dir` using the default file names.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::with_file_names(
            data_dir,
            DEFAULT_SETTLEMENTS_FILE,
            DEFAULT_DISTRICTS_FILE,
            DEFAULT_SPEARS_FILE,
        )
    }

    /// Store under `data_dir` with explicit file names.
    pub fn with_file_names(
        data_dir: impl AsRef<Path>,
        settlements_file: &str,
        districts_file: &str,
        spears_file: &str,
    ) -> Self {
        let dir = data_dir.as_ref();
        Self {
            settlements_path: dir.join(settlements_file),
            blueprints_path: dir.join(districts_file),
            spears_path: dir.join(spears_file),
        }
    }

    /// Path of the settlement collection.
    pub fn settlements_path(&self) -> &Path {
        &self.settlements_path
    }

    /// Path of the blueprint catalog.
    pub fn blueprints_path(&self) -> &Path {
        &self.blueprints_path
    }

    /// Path of the spear collection.
    pub fn spears_path(&self) -> &Path {
        &self.spears_path
    }
}

impl Repository for JsonFileRepository {
    async fn load_settlements(&self) -> Vec<Settlement> {
        load_collection(&self.settlements_path).await
    }

    async fn save_settlements(&self, settlements: &[Settlement]) -> Result<(), StoreError> {
        save_collection(&self.settlements_path, settlements).await
    }

    async fn load_blueprints(&self) -> Vec<Blueprint> {
        load_collection(&self.blueprints_path).await
    }

    async fn save_blueprints(&self, blueprints: &[Blueprint]) -> Result<(), StoreError> {
        save_collection(&self.blueprints_path, blueprints).await
    }

    async fn load_spears(&self) -> Vec<Spear> {
        load_collection(&self.spears_path).await
    }

    async fn save_spears(&self, spears: &[Spear]) -> Result<(), StoreError> {
        save_collection(&self.spears_path, spears).await
    }
}

/// Read a JSON array, degrading every failure to an empty collection.
async fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Collection file missing, starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Collection file unreadable, starting empty");
            return Vec::new();
        }
    };

    if contents.trim().is_empty() {
        tracing::debug!(path = %path.display(), "Collection file empty");
        return Vec::new();
    }

    match serde_json::from_str(&contents) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Collection file corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Write a collection as a pretty-printed JSON array, creating the directory.
async fn save_collection<T: Serialize + Sync>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(items)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), count = items.len(), "Saved collection");
    Ok(())
}
