//! Type-safe integer identifier wrappers.
//!
//! Every entity carries a strongly-typed ID so that, for example, a
//! [`ResourceId`] can never be passed where a [`DistrictId`] is expected.
//! IDs are small sequential integers assigned by the owning collection
//! (`max existing + 1`), and serialize as plain numbers so the
//! persisted JSON stays field-named and human-readable.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
            Deserialize, TS,
        )]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw integer identifier.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the inner integer value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a settlement.
    SettlementId
}

define_id! {
    /// Identifier of a ledger entry, unique within its settlement.
    ResourceId
}

define_id! {
    /// Identifier of a catalog blueprint. Id 0 is the starter district.
    BlueprintId
}

define_id! {
    /// Identifier of a built district, unique within its settlement.
    DistrictId
}

define_id! {
    /// Identifier of a resident, unique across every settlement.
    ResidentId
}

define_id! {
    /// Unique identifier for a spear (military unit).
    SpearId
}

/// Return the id after the largest of `ids`, or `first` when `ids` is empty.
///
/// Every collection in the workspace assigns ids this way. Returns `None`
/// only when the largest id is already `u32::MAX`.
pub fn next_id<T, I>(ids: I, first: T) -> Option<T>
where
    T: Copy + Ord + From<u32> + Into<u32>,
    I: IntoIterator<Item = T>,
{
    match ids.into_iter().max() {
        Some(max) => max.into().checked_add(1).map(T::from),
        None => Some(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_serializes_as_plain_number() {
        let json = serde_json::to_string(&SettlementId::new(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));
        let restored: Result<SettlementId, _> = serde_json::from_str("7");
        assert_eq!(restored.ok(), Some(SettlementId::new(7)));
    }

    #[test]
    fn id_display_matches_inner() {
        assert_eq!(ResidentId::new(42).to_string(), "42");
    }

    #[test]
    fn next_id_on_empty_uses_first() {
        let none: Vec<DistrictId> = Vec::new();
        assert_eq!(next_id(none, DistrictId::new(0)), Some(DistrictId::new(0)));
        let none: Vec<ResourceId> = Vec::new();
        assert_eq!(next_id(none, ResourceId::new(1)), Some(ResourceId::new(1)));
    }

    #[test]
    fn next_id_follows_maximum_not_count() {
        let ids = [ResourceId::new(1), ResourceId::new(9), ResourceId::new(4)];
        assert_eq!(next_id(ids, ResourceId::new(1)), Some(ResourceId::new(10)));
    }

    #[test]
    fn next_id_overflow_is_none() {
        assert_eq!(next_id([SpearId::new(u32::MAX)], SpearId::new(1)), None);
    }
}
