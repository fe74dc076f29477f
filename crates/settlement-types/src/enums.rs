//! Enumeration types for the settlement economy.
//!
//! Variant names double as the persisted textual form: kind → quantity maps
//! are written as JSON objects keyed by these names.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resource kinds
// ---------------------------------------------------------------------------

/// The rarity class of a ledger entry.
///
/// Affordability checks, production and consumption are all keyed by kind,
/// never by individual resource name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Common materials (wood, stone, grain).
    #[default]
    Ordinary,
    /// Processed or uncommon materials.
    Special,
    /// Scarce materials.
    Rare,
    /// One-of-a-kind materials.
    Unique,
    /// Materials of supernatural origin.
    Mystical,
    /// Implements consumed by construction.
    Tool,
}

impl ResourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Ordinary,
        Self::Special,
        Self::Rare,
        Self::Unique,
        Self::Mystical,
        Self::Tool,
    ];

    /// The textual name used in persisted maps and auto-created entries.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ordinary => "Ordinary",
            Self::Special => "Special",
            Self::Rare => "Rare",
            Self::Unique => "Unique",
            Self::Mystical => "Mystical",
            Self::Tool => "Tool",
        }
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// District grades
// ---------------------------------------------------------------------------

/// The grade of a district blueprint.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum DistrictGrade {
    /// Basic district.
    #[default]
    Ordinary,
    /// Improved district.
    Special,
    /// Scarce district.
    Rare,
    /// One per settlement in practice.
    Unique,
    /// Supernatural district.
    Mystical,
}
