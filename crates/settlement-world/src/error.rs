//! Error types for the `settlement-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`].

use settlement_ledger::LedgerError;
use settlement_types::{BlueprintId, DistrictId, ResidentId, SpearId};

/// Errors that can occur while applying world rules to a settlement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The settlement cannot pay a blueprint's resource or tool cost.
    #[error("insufficient resources or tools to build {blueprint}")]
    InsufficientResourcesOrTools {
        /// Name of the blueprint that was requested.
        blueprint: String,
    },

    /// An argument was outside its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A spear leader must be one of its members.
    #[error("resident {resident} is not a member of spear {spear}")]
    NotAMember {
        /// The spear.
        spear: SpearId,
        /// The resident that was proposed.
        resident: ResidentId,
    },

    /// No built district with this id exists in the settlement.
    #[error("district not found: {0}")]
    DistrictNotFound(DistrictId),

    /// No resident with this id exists in the settlement.
    #[error("resident not found: {0}")]
    ResidentNotFound(ResidentId),

    /// No blueprint with this id exists in the catalog.
    #[error("blueprint not found: {0}")]
    BlueprintNotFound(BlueprintId),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,

    /// A ledger rule rejected the change.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
