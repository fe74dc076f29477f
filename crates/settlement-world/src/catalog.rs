//! The district blueprint catalog.
//!
//! Blueprints are stored as their own collection, independent of any
//! settlement. [`CatalogStore`] is an in-memory view over that collection:
//! the service loads it, looks blueprints up or registers new ones, and saves
//! [`CatalogStore::into_inner`] back when it changed.
//!
//! Blueprint 0 is the starter district. Every new settlement receives a built
//! copy of it, which is why an empty catalog hands out id 0 first.

use settlement_types::{Blueprint, BlueprintId, next_id};

use crate::error::WorldError;

/// Catalog id of the starter blueprint.
pub const STARTER_BLUEPRINT_ID: BlueprintId = BlueprintId::new(0);

/// Blueprint collection with id assignment and name lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStore {
    /// Blueprints in registration order.
    blueprints: Vec<Blueprint>,
}

impl CatalogStore {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        Self {
            blueprints: Vec::new(),
        }
    }

    /// Wrap a loaded blueprint collection.
    pub const fn from_blueprints(blueprints: Vec<Blueprint>) -> Self {
        Self { blueprints }
    }

    /// Add a blueprint under the next unused id and return that id.
    ///
    /// Whatever id the incoming blueprint carries is replaced. The first
    /// blueprint registered in an empty catalog becomes the starter.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if the id space is exhausted.
    pub fn register(&mut self, mut blueprint: Blueprint) -> Result<BlueprintId, WorldError> {
        let id = next_id(self.blueprints.iter().map(|b| b.id), STARTER_BLUEPRINT_ID)
            .ok_or(WorldError::ArithmeticOverflow)?;
        blueprint.id = id;
        tracing::info!(%id, name = %blueprint.name, "Registered blueprint");
        self.blueprints.push(blueprint);
        Ok(id)
    }

    /// Look a blueprint up by id.
    pub fn get(&self, id: BlueprintId) -> Option<&Blueprint> {
        self.blueprints.iter().find(|b| b.id == id)
    }

    /// Look a blueprint up by display name, ignoring case.
    ///
    /// When several blueprints share a name the first registered wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Blueprint> {
        let wanted = name.to_lowercase();
        self.blueprints
            .iter()
            .find(|b| b.name.to_lowercase() == wanted)
    }

    /// The starter blueprint, if one has been registered.
    pub fn starter(&self) -> Option<&Blueprint> {
        self.get(STARTER_BLUEPRINT_ID)
    }

    /// All blueprints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Blueprint> {
        self.blueprints.iter()
    }

    /// Number of blueprints.
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Give back the collection for persisting.
    pub fn into_inner(self) -> Vec<Blueprint> {
        self.blueprints
    }
}
