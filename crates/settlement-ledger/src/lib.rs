//! Resource ledger accounting for the settlement economy.
//!
//! A settlement's ledger is its list of [`Resource`] entries. This crate owns
//! every rule for changing that list:
//!
//! - [`ledger`] -- The [`Ledger`] handle: identity-merging upsert, strict
//!   deduction, saldo and lookups.
//! - [`adjust`] -- The three quantity adjustments used by the engines, kept
//!   separate because their floor behaviour differs.
//!
//! # Floor behaviour
//!
//! | Operation | Insufficient quantity | Below zero |
//! |-----------|----------------------|------------|
//! | [`Ledger::deduct`] | fails, no mutation | never |
//! | [`Ledger::deduct_clamped`] | clamps | never |
//! | [`Ledger::consume_tool`] | clamps | never |
//! | [`Ledger::apply_delta`] | n/a | allowed |
//!
//! # Usage
//!
//! ```
//! use settlement_ledger::Ledger;
//! use settlement_types::{NewResource, ResourceKind};
//!
//! let mut entries = Vec::new();
//! let mut ledger = Ledger::new(&mut entries);
//! ledger.upsert(&NewResource::material(ResourceKind::Ordinary, "Wood", 10)).ok();
//! ledger.upsert(&NewResource::material(ResourceKind::Ordinary, "wood", 5)).ok();
//!
//! assert_eq!(ledger.len(), 1);
//! assert_eq!(ledger.saldo(), Ok(15));
//! ```
//!
//! [`Resource`]: settlement_types::Resource

pub mod adjust;
pub mod ledger;

// Re-export primary types at crate root.
pub use ledger::{Ledger, Upsert, first_of_kind, sum_all};

use settlement_types::{ResourceId, ResourceKind};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when changing a ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// No entry with this kind and id exists.
    #[error("no {kind} resource with id {id}")]
    NotFound {
        /// The requested kind.
        kind: ResourceKind,
        /// The requested id.
        id: ResourceId,
    },

    /// A direct deduction asked for more than the entry holds.
    #[error("insufficient {name}: wanted {requested} but only {available} available")]
    InsufficientQuantity {
        /// Name the caller used for the entry.
        name: String,
        /// Quantity requested.
        requested: i64,
        /// Quantity held.
        available: i64,
    },

    /// Quantities added or deducted directly must not be negative.
    #[error("resource amount must not be negative, got {0}")]
    InvalidAmount(i64),

    /// A checked arithmetic operation overflowed.
    #[error("arithmetic overflow in ledger calculation")]
    ArithmeticOverflow,
}
