//! In-memory storage for tests and ephemeral runs.

use settlement_types::{Blueprint, Settlement, Spear};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::repository::Repository;

/// [`Repository`] holding each collection behind its own lock.
///
/// Every load clones the collection and every save replaces it wholesale,
/// matching the file store's semantics.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    settlements: RwLock<Vec<Settlement>>,
    blueprints: RwLock<Vec<Blueprint>>,
    spears: RwLock<Vec<Spear>>,
}

impl InMemoryRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose catalog already holds `blueprints`.
    pub fn with_blueprints(blueprints: Vec<Blueprint>) -> Self {
        Self {
            blueprints: RwLock::new(blueprints),
            ..Self::default()
        }
    }
}

impl Repository for InMemoryRepository {
    async fn load_settlements(&self) -> Vec<Settlement> {
        self.settlements.read().await.clone()
    }

    async fn save_settlements(&self, settlements: &[Settlement]) -> Result<(), StoreError> {
        *self.settlements.write().await = settlements.to_vec();
        Ok(())
    }

    async fn load_blueprints(&self) -> Vec<Blueprint> {
        self.blueprints.read().await.clone()
    }

    async fn save_blueprints(&self, blueprints: &[Blueprint]) -> Result<(), StoreError> {
        *self.blueprints.write().await = blueprints.to_vec();
        Ok(())
    }

    async fn load_spears(&self) -> Vec<Spear> {
        self.spears.read().await.clone()
    }

    async fn save_spears(&self, spears: &[Spear]) -> Result<(), StoreError> {
        *self.spears.write().await = spears.to_vec();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use settlement_types::SettlementId;

    use super::*;

    #[tokio::test]
    async fn starts_empty() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_settlements().await.is_empty());
        assert!(repo.load_blueprints().await.is_empty());
        assert!(repo.load_spears().await.is_empty());
    }

    #[tokio::test]
    async fn save_replaces_whole_collection() {
        let repo = InMemoryRepository::new();
        let a = Settlement::new(SettlementId::new(1), String::from("A"), String::new(), Utc::now());
        let b = Settlement::new(SettlementId::new(2), String::from("B"), String::new(), Utc::now());

        repo.save_settlements(&[a, b.clone()]).await.unwrap();
        repo.save_settlements(&[b]).await.unwrap();

        let loaded = repo.load_settlements().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.first().map(|s| s.id), Some(SettlementId::new(2)));
    }
}
