//! Core entity structs for the settlement economy.
//!
//! A [`Settlement`] exclusively owns its built districts, residents, ledger
//! entries and (in hydrated views) spears. District [`Blueprint`]s live in a
//! separate catalog collection; a [`BuiltDistrict`] is the attached copy of
//! one, carrying the production profile but not the one-time build cost.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DistrictGrade, ResourceKind};
use crate::ids::{BlueprintId, DistrictId, ResidentId, ResourceId, SettlementId, SpearId};

// ---------------------------------------------------------------------------
// Ledger entries
// ---------------------------------------------------------------------------

/// One entry of a settlement's resource ledger.
///
/// `amount` is signed: direct deductions and construction never push it
/// below zero, but daily production applies consumption unclamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Resource {
    /// Identifier, unique within the owning settlement.
    pub id: ResourceId,
    /// Rarity class.
    pub kind: ResourceKind,
    /// Display name.
    pub name: String,
    /// Quantity held.
    #[ts(type = "number")]
    pub amount: i64,
    /// Tools merge by name alone and are consumed one unit per build.
    #[serde(default)]
    pub is_tool: bool,
}

/// A resource contribution that has not been filed in a ledger yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewResource {
    /// Rarity class.
    pub kind: ResourceKind,
    /// Display name.
    pub name: String,
    /// Quantity to add. Must not be negative.
    #[ts(type = "number")]
    pub amount: i64,
    /// Whether the contribution is a tool.
    #[serde(default)]
    pub is_tool: bool,
}

impl NewResource {
    /// A non-tool contribution.
    pub fn material(kind: ResourceKind, name: &str, amount: i64) -> Self {
        Self {
            kind,
            name: name.to_owned(),
            amount,
            is_tool: false,
        }
    }

    /// A tool contribution, filed under [`ResourceKind::Tool`].
    pub fn tool(name: &str, amount: i64) -> Self {
        Self {
            kind: ResourceKind::Tool,
            name: name.to_owned(),
            amount,
            is_tool: true,
        }
    }
}

/// A `(kind, quantity)` pair: a build cost line or a daily consumption line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RequiredResource {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Quantity.
    pub quantity: u32,
}

impl RequiredResource {
    /// Construct a requirement line.
    pub const fn new(kind: ResourceKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }
}

// ---------------------------------------------------------------------------
// Districts
// ---------------------------------------------------------------------------

/// A reusable district template held in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Blueprint {
    /// Catalog identifier. Blueprint 0 seeds every new settlement.
    pub id: BlueprintId,
    /// Display name; build requests may refer to it case-insensitively.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// District grade.
    #[serde(default)]
    pub grade: DistrictGrade,
    /// Free-text description of how the district produces.
    #[serde(default)]
    pub production_mode: String,
    /// Free-text bonus granted to players.
    #[serde(default)]
    pub buff_for_players: String,
    /// One-time resource cost, checked and deducted per kind.
    #[serde(default)]
    pub required_resources: Vec<RequiredResource>,
    /// Tool names; each build consumes one unit of every listed tool.
    #[serde(default)]
    pub required_tools: Vec<String>,
    /// Quantity produced per simulated day, per kind.
    #[serde(default)]
    #[ts(type = "Partial<Record<ResourceKind, number>>")]
    pub daily_output: BTreeMap<ResourceKind, u32>,
    /// Quantity consumed per simulated day.
    #[serde(default)]
    pub daily_input: Vec<RequiredResource>,
}

/// A district attached to a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuiltDistrict {
    /// Identifier, unique within the owning settlement (first is 0).
    pub id: DistrictId,
    /// The owning settlement.
    pub settlement_id: SettlementId,
    /// The blueprint this district was built from.
    pub blueprint_id: BlueprintId,
    /// Display name copied from the blueprint.
    pub name: String,
    /// Free-text description copied from the blueprint.
    #[serde(default)]
    pub description: String,
    /// Grade copied from the blueprint.
    #[serde(default)]
    pub grade: DistrictGrade,
    /// Daily production copied from the blueprint.
    #[serde(default)]
    #[ts(type = "Partial<Record<ResourceKind, number>>")]
    pub daily_output: BTreeMap<ResourceKind, u32>,
    /// Daily consumption copied from the blueprint.
    #[serde(default)]
    pub daily_input: Vec<RequiredResource>,
    /// Residents working here.
    #[serde(default)]
    pub resident_ids: Vec<ResidentId>,
    /// Always empty once attached; the cost has been paid.
    #[serde(default)]
    pub required_resources: Vec<RequiredResource>,
    /// Always empty once attached; the tools have been consumed.
    #[serde(default)]
    pub required_tools: Vec<String>,
    /// When the district was attached.
    pub built_at: DateTime<Utc>,
}

impl BuiltDistrict {
    /// Instantiate `blueprint` as district `id` of `settlement_id`.
    ///
    /// The production profile is copied; the requirement lists start empty.
    pub fn from_blueprint(
        blueprint: &Blueprint,
        id: DistrictId,
        settlement_id: SettlementId,
        built_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            settlement_id,
            blueprint_id: blueprint.id,
            name: blueprint.name.clone(),
            description: blueprint.description.clone(),
            grade: blueprint.grade,
            daily_output: blueprint.daily_output.clone(),
            daily_input: blueprint.daily_input.clone(),
            resident_ids: Vec::new(),
            required_resources: Vec::new(),
            required_tools: Vec::new(),
            built_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Residents
// ---------------------------------------------------------------------------

/// A settler living in a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Resident {
    /// Identifier, unique across every settlement.
    pub id: ResidentId,
    /// The owning settlement.
    pub settlement_id: SettlementId,
    /// The district the resident works in, if assigned.
    #[serde(default)]
    pub district_id: Option<DistrictId>,
    /// Display name.
    pub name: String,
    /// Profession.
    #[serde(default)]
    pub occupation: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Marked as an important settler.
    #[serde(default)]
    pub is_important: bool,
    /// Has reached ascended status; each ascended spear member adds yield.
    #[serde(default)]
    pub is_ascended: bool,
    /// Ascension grade.
    #[serde(default)]
    pub ascension_grade: u32,
    /// Star coin balance.
    #[serde(default)]
    pub star_coins: u32,
    /// Coin balance.
    #[serde(default)]
    pub coins: u32,
    /// When the resident joined.
    pub date_added: DateTime<Utc>,
}

/// Input for registering a resident; ids and ownership are assigned on add.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewResident {
    /// Display name.
    pub name: String,
    /// Profession.
    #[serde(default)]
    pub occupation: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Marked as an important settler.
    #[serde(default)]
    pub is_important: bool,
    /// Has reached ascended status.
    #[serde(default)]
    pub is_ascended: bool,
    /// Ascension grade.
    #[serde(default)]
    pub ascension_grade: u32,
    /// District to place the resident in, if any.
    #[serde(default)]
    pub district_id: Option<DistrictId>,
}

// ---------------------------------------------------------------------------
// Spears
// ---------------------------------------------------------------------------

/// A military unit grouping residents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Spear {
    /// Identifier, unique across every spear.
    pub id: SpearId,
    /// The settlement the spear serves.
    pub settlement_id: SettlementId,
    /// The district the spear is quartered in.
    pub district_id: DistrictId,
    /// Members, copied by value when added.
    #[serde(default)]
    pub members: Vec<Resident>,
    /// Leader; always a member at the time it was set.
    #[serde(default)]
    pub leader_id: Option<ResidentId>,
    /// Grade, nominally 0 to 4.
    #[serde(default)]
    pub grade: u32,
}

impl Spear {
    /// An empty grade-0 spear.
    pub const fn new(id: SpearId, settlement_id: SettlementId, district_id: DistrictId) -> Self {
        Self {
            id,
            settlement_id,
            district_id,
            members: Vec::new(),
            leader_id: None,
            grade: 0,
        }
    }

    /// Whether `resident_id` is a member.
    pub fn has_member(&self, resident_id: ResidentId) -> bool {
        self.members.iter().any(|m| m.id == resident_id)
    }
}

// ---------------------------------------------------------------------------
// Settlements
// ---------------------------------------------------------------------------

/// The top-level aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Settlement {
    /// Unique identifier.
    pub id: SettlementId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Glory score.
    #[serde(default)]
    pub glory: u32,
    /// When the settlement was founded.
    pub created_at: DateTime<Utc>,
    /// Built districts.
    #[serde(default)]
    pub districts: Vec<BuiltDistrict>,
    /// Residents.
    #[serde(default)]
    pub residents: Vec<Resident>,
    /// The resource ledger.
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Spears; filled from the spear collection in read views only.
    #[serde(default)]
    pub spears: Vec<Spear>,
}

impl Settlement {
    /// An empty settlement.
    pub const fn new(
        id: SettlementId,
        name: String,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            glory: 0,
            created_at,
            districts: Vec::new(),
            residents: Vec::new(),
            resources: Vec::new(),
            spears: Vec::new(),
        }
    }

    /// Look up a built district.
    pub fn district(&self, id: DistrictId) -> Option<&BuiltDistrict> {
        self.districts.iter().find(|d| d.id == id)
    }

    /// Look up a built district mutably.
    pub fn district_mut(&mut self, id: DistrictId) -> Option<&mut BuiltDistrict> {
        self.districts.iter_mut().find(|d| d.id == id)
    }

    /// Look up a resident.
    pub fn resident(&self, id: ResidentId) -> Option<&Resident> {
        self.residents.iter().find(|r| r.id == id)
    }

    /// Look up a ledger entry.
    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }
}

/// Input for founding a settlement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewSettlement {
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}
