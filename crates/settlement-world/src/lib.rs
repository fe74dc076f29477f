//! World rules for the settlement economy.
//!
//! Everything here is synchronous and operates on in-memory values; the
//! service layer loads collections, hands them to these functions and saves
//! the result once.
//!
//! # Modules
//!
//! - [`catalog`] -- [`CatalogStore`], the blueprint collection with id
//!   assignment, name lookup and the starter blueprint.
//! - [`construction`] -- Affordability checks and all-or-nothing builds.
//! - [`production`] -- Daily output and consumption across built districts.
//! - [`spear`] -- Spear yield, leadership and membership.
//! - [`population`] -- Resident ids, district placement and build counts.
//! - [`error`] -- [`WorldError`].

pub mod catalog;
pub mod construction;
pub mod error;
pub mod population;
pub mod production;
pub mod spear;

#[cfg(test)]
mod test_support;

// Re-export primary types at crate root.
pub use catalog::{CatalogStore, STARTER_BLUEPRINT_ID};
pub use construction::{build, can_build};
pub use error::WorldError;
pub use population::{
    admit_resident, assign_to_district, built_district_counts, next_resident_id,
    residents_in_district,
};
pub use production::{
    DailyDelta, advance_days, apply_daily_delta, compute_daily_delta, district_input,
    district_output,
};
pub use spear::{add_member, set_leader, settlement_daily_yield, yield_per_day};
