//! Construction rules: affordability checks and one-time cost deduction.
//!
//! A build is all-or-nothing. [`can_build`] is evaluated against the whole
//! requirement list first; only when every line passes are the costs
//! charged through the clamped ledger primitives and the district attached.
//!
//! Affordability only inspects the *first* ledger entry of each kind. Two
//! Ordinary stacks of 3 do not pay for a cost of 5.

use chrono::{DateTime, Utc};
use settlement_ledger::{Ledger, first_of_kind};
use settlement_types::{
    Blueprint, BuiltDistrict, DistrictId, RequiredResource, ResourceKey, Settlement, next_id,
};

use crate::error::WorldError;

/// Id of the first district attached to a settlement.
const FIRST_DISTRICT_ID: DistrictId = DistrictId::new(0);

/// Whether `settlement` can pay the given costs.
///
/// Every `(kind, quantity)` line needs the first entry of that kind to hold
/// at least `quantity`. Every tool name needs a ledger entry flagged as a
/// tool with that name, compared case-insensitively. A tool at zero still
/// counts as present.
pub fn can_build(
    settlement: &Settlement,
    required_resources: &[RequiredResource],
    required_tools: &[String],
) -> bool {
    let resources_ok = required_resources.iter().all(|req| {
        first_of_kind(&settlement.resources, req.kind)
            .is_some_and(|entry| entry.amount >= i64::from(req.quantity))
    });

    let tools_ok = required_tools.iter().all(|name| {
        let key = ResourceKey::tool(name);
        settlement.resources.iter().any(|entry| key.matches(entry))
    });

    resources_ok && tools_ok
}

/// Build `blueprint` in `settlement`, paying its costs.
///
/// On success the costs have been deducted (clamped at zero), one unit of
/// every required tool consumed, and the new district appended. The returned
/// copy is identical to the appended one. The caller persists the settlement.
///
/// # Errors
///
/// - [`WorldError::InsufficientResourcesOrTools`] if any requirement fails;
///   the settlement is left untouched.
/// - [`WorldError::ArithmeticOverflow`] if the district id space is exhausted.
pub fn build(
    settlement: &mut Settlement,
    blueprint: &Blueprint,
    now: DateTime<Utc>,
) -> Result<BuiltDistrict, WorldError> {
    if !can_build(settlement, &blueprint.required_resources, &blueprint.required_tools) {
        tracing::warn!(
            settlement = %settlement.id,
            blueprint = %blueprint.name,
            "Rejected build: requirements not met"
        );
        return Err(WorldError::InsufficientResourcesOrTools {
            blueprint: blueprint.name.clone(),
        });
    }

    // Allocate the id before touching the ledger so a failure here mutates nothing.
    let id = next_id(settlement.districts.iter().map(|d| d.id), FIRST_DISTRICT_ID)
        .ok_or(WorldError::ArithmeticOverflow)?;

    let mut ledger = Ledger::new(&mut settlement.resources);
    for req in &blueprint.required_resources {
        ledger.deduct_clamped(req.kind, req.quantity);
    }
    for tool in &blueprint.required_tools {
        ledger.consume_tool(tool);
    }

    let district = BuiltDistrict::from_blueprint(blueprint, id, settlement.id, now);
    settlement.districts.push(district.clone());

    tracing::info!(
        settlement = %settlement.id,
        district = %id,
        blueprint = %blueprint.id,
        name = %blueprint.name,
        "Built district"
    );
    Ok(district)
}
