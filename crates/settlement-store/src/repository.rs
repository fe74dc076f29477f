//! The [`Repository`] trait: three independently persisted collections.

use std::future::Future;

use settlement_types::{Blueprint, Settlement, Spear};

use crate::error::StoreError;

/// Whole-collection persistence for settlements, blueprints and spears.
///
/// Every load returns the full collection and every save replaces it. There
/// is no locking: two callers that load, mutate and save the same
/// collection race, and the later save wins.
///
/// Loads never fail. A missing, empty or unreadable source yields an empty
/// collection; implementations log which case occurred.
pub trait Repository: Send + Sync {
    /// All settlements, with their districts, residents and ledgers.
    ///
    /// Spears are not part of this collection; see [`Repository::load_spears`].
    fn load_settlements(&self) -> impl Future<Output = Vec<Settlement>> + Send;

    /// Replace the settlement collection.
    fn save_settlements(
        &self,
        settlements: &[Settlement],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// The blueprint catalog.
    fn load_blueprints(&self) -> impl Future<Output = Vec<Blueprint>> + Send;

    /// Replace the blueprint catalog.
    fn save_blueprints(
        &self,
        blueprints: &[Blueprint],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// All spears of every settlement.
    fn load_spears(&self) -> impl Future<Output = Vec<Spear>> + Send;

    /// Replace the spear collection.
    fn save_spears(&self, spears: &[Spear]) -> impl Future<Output = Result<(), StoreError>> + Send;
}
