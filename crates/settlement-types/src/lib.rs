//! Shared type definitions for the settlement economy.
//!
//! This crate is the single source of truth for the entities passed between
//! the ledger, the world engines, the repository and the service layer.
//! Types flow downstream to `TypeScript` via `ts-rs` for the browser front end.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for all entity identifiers
//! - [`enums`] -- Resource kinds and district grades
//! - [`key`] -- [`ResourceKey`], the normalized case-insensitive merge identity
//! - [`structs`] -- Settlements, ledger entries, blueprints, residents, spears

pub mod enums;
pub mod ids;
pub mod key;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DistrictGrade, ResourceKind};
pub use ids::{BlueprintId, DistrictId, ResidentId, ResourceId, SettlementId, SpearId, next_id};
pub use key::ResourceKey;
pub use structs::{
    Blueprint, BuiltDistrict, NewResident, NewResource, NewSettlement, RequiredResource, Resident,
    Resource, Settlement, Spear,
};
