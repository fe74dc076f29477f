//! Error types for the service layer.
//!
//! Lower-layer errors convert into [`ServiceError`] with `From`, so service
//! operations use `?` throughout. Nothing is saved when an operation fails.

use settlement_ledger::LedgerError;
use settlement_store::StoreError;
use settlement_types::{ResidentId, SpearId};
use settlement_world::WorldError;

/// Errors returned by [`SettlementService`](crate::SettlementService) operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity, e.g. "settlement" or "blueprint".
        entity: &'static str,
        /// The id that was looked up, or the name for name lookups.
        id: String,
    },

    /// A build request could not be paid for.
    #[error("insufficient resources or tools to build {blueprint}")]
    InsufficientResourcesOrTools {
        /// Name of the blueprint.
        blueprint: String,
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

    /// An argument was outside its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A proposed spear leader is not a member.
    #[error("resident {resident} is not a member of spear {spear}")]
    NotAMember {
        /// The spear.
        spear: SpearId,
        /// The resident that was proposed.
        resident: ResidentId,
    },

    /// Persisting a collection failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A checked arithmetic operation overflowed.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

impl ServiceError {
    /// A [`ServiceError::NotFound`] for `entity` with any displayable id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<LedgerError> for ServiceError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound { kind, id } => Self::not_found("resource", format!("{kind} {id}")),
            LedgerError::InsufficientQuantity {
                name,
                requested,
                available,
            } => Self::InsufficientQuantity {
                name,
                requested,
                available,
            },
            LedgerError::InvalidAmount(amount) => {
                Self::InvalidArgument(format!("resource amount must not be negative, got {amount}"))
            }
            LedgerError::ArithmeticOverflow => Self::ArithmeticOverflow,
        }
    }
}

impl From<WorldError> for ServiceError {
    fn from(err: WorldError) -> Self {
        match err {
            WorldError::InsufficientResourcesOrTools { blueprint } => {
                Self::InsufficientResourcesOrTools { blueprint }
            }
            WorldError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            WorldError::NotAMember { spear, resident } => Self::NotAMember { spear, resident },
            WorldError::DistrictNotFound(id) => Self::not_found("district", id),
            WorldError::ResidentNotFound(id) => Self::not_found("resident", id),
            WorldError::BlueprintNotFound(id) => Self::not_found("blueprint", id),
            WorldError::ArithmeticOverflow => Self::ArithmeticOverflow,
            WorldError::Ledger(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use settlement_types::{ResourceId, ResourceKind};

    use super::*;

    #[test]
    fn ledger_errors_map_to_service_variants() {
        let err: ServiceError = LedgerError::NotFound {
            kind: ResourceKind::Rare,
            id: ResourceId::new(4),
        }
        .into();
        assert!(matches!(err, ServiceError::NotFound { entity: "resource", .. }));

        let err: ServiceError = LedgerError::InvalidAmount(-1).into();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn wrapped_ledger_error_is_unwrapped() {
        let err: ServiceError = WorldError::Ledger(LedgerError::ArithmeticOverflow).into();
        assert!(matches!(err, ServiceError::ArithmeticOverflow));
    }

    #[test]
    fn not_a_member_keeps_ids_in_message() {
        let err: ServiceError = WorldError::NotAMember {
            spear: SpearId::new(2),
            resident: ResidentId::new(9),
        }
        .into();
        assert_eq!(err.to_string(), "resident 9 is not a member of spear 2");
    }
}
