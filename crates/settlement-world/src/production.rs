//! Daily production and consumption across built districts.
//!
//! Each simulated day every district adds its `daily_output` and removes its
//! `daily_input`. The per-kind net change is applied with
//! [`Ledger::apply_delta`], so consumption is never clamped and a kind the
//! ledger lacks gets a fresh entry (possibly negative).
//!
//! Advancing several days is exactly that many single days applied in
//! sequence.

use std::collections::BTreeMap;

use settlement_ledger::Ledger;
use settlement_types::{BuiltDistrict, ResourceKind, Settlement};

use crate::error::WorldError;

/// Net change per resource kind.
pub type DailyDelta = BTreeMap<ResourceKind, i64>;

/// Quantity one district produces per day, per kind.
///
/// # Errors
///
/// Returns [`WorldError::ArithmeticOverflow`] if a sum overflows.
pub fn district_output(district: &BuiltDistrict) -> Result<DailyDelta, WorldError> {
    let mut output = DailyDelta::new();
    for (&kind, &quantity) in &district.daily_output {
        add(&mut output, kind, i64::from(quantity))?;
    }
    Ok(output)
}

/// Quantity one district consumes per day, per kind.
///
/// Repeated input lines for the same kind are summed.
///
/// # Errors
///
/// Returns [`WorldError::ArithmeticOverflow`] if a sum overflows.
pub fn district_input(district: &BuiltDistrict) -> Result<DailyDelta, WorldError> {
    let mut input = DailyDelta::new();
    for line in &district.daily_input {
        add(&mut input, line.kind, i64::from(line.quantity))?;
    }
    Ok(input)
}

/// Net per-kind change one day brings to `settlement`.
///
/// Output of every district is summed first, then every district's input is
/// subtracted. A kind that is only consumed appears with a negative value.
///
/// # Errors
///
/// Returns [`WorldError::ArithmeticOverflow`] if a sum overflows.
pub fn compute_daily_delta(settlement: &Settlement) -> Result<DailyDelta, WorldError> {
    let mut delta = DailyDelta::new();

    for district in &settlement.districts {
        for (kind, quantity) in district_output(district)? {
            add(&mut delta, kind, quantity)?;
        }
    }

    for district in &settlement.districts {
        for (kind, quantity) in district_input(district)? {
            let negated = quantity.checked_neg().ok_or(WorldError::ArithmeticOverflow)?;
            add(&mut delta, kind, negated)?;
        }
    }

    Ok(delta)
}

/// Apply a per-kind change to the settlement's ledger, unclamped.
///
/// # Errors
///
/// Returns [`WorldError::Ledger`] if an entry amount or new id overflows.
pub fn apply_daily_delta(settlement: &mut Settlement, delta: &DailyDelta) -> Result<(), WorldError> {
    let mut ledger = Ledger::new(&mut settlement.resources);
    for (&kind, &change) in delta {
        ledger.apply_delta(kind, change)?;
    }
    Ok(())
}

/// Run `days` simulated days of production and return the total change.
///
/// Days are applied one at a time. A settlement whose districts produce and
/// consume nothing returns an empty change without iterating. The caller
/// persists the settlement once afterwards.
///
/// # Errors
///
/// - [`WorldError::InvalidArgument`] if `days` is zero or negative.
/// - [`WorldError::ArithmeticOverflow`] or [`WorldError::Ledger`] on overflow.
pub fn advance_days(settlement: &mut Settlement, days: i64) -> Result<DailyDelta, WorldError> {
    if days <= 0 {
        return Err(WorldError::InvalidArgument(format!(
            "days to advance must be positive, got {days}"
        )));
    }

    // Districts do not change while days pass, so one day's delta holds for all.
    let delta = compute_daily_delta(settlement)?;
    if delta.is_empty() {
        tracing::debug!(settlement = %settlement.id, days, "No production to advance");
        return Ok(DailyDelta::new());
    }

    let mut total = DailyDelta::new();
    for _ in 0..days {
        apply_daily_delta(settlement, &delta)?;
        for (&kind, &change) in &delta {
            add(&mut total, kind, change)?;
        }
    }

    tracing::info!(
        settlement = %settlement.id,
        days,
        kinds = total.len(),
        "Advanced production days"
    );
    Ok(total)
}

/// Add `quantity` to `kind` in `map`, starting from zero when absent.
fn add(map: &mut DailyDelta, kind: ResourceKind, quantity: i64) -> Result<(), WorldError> {
    let slot = map.entry(kind).or_insert(0);
    *slot = slot
        .checked_add(quantity)
        .ok_or(WorldError::ArithmeticOverflow)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;
    use settlement_types::{DistrictId, NewResource, RequiredResource};

    use super::*;
    use crate::test_support::{blueprint, settlement_with};

    fn attach(settlement: &mut Settlement, output: &[(ResourceKind, u32)], input: &[(ResourceKind, u32)]) {
        let mut bp = blueprint(9, "Workshop");
        bp.daily_output = output.iter().copied().collect();
        bp.daily_input = input
            .iter()
            .map(|&(kind, quantity)| RequiredResource::new(kind, quantity))
            .collect();
        let id = DistrictId::new(u32::try_from(settlement.districts.len()).unwrap());
        settlement
            .districts
            .push(BuiltDistrict::from_blueprint(&bp, id, settlement.id, Utc::now()));
    }

    fn amount_of_kind(settlement: &Settlement, kind: ResourceKind) -> Option<i64> {
        settlement
            .resources
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.amount)
    }

    #[test]
    fn delta_sums_outputs_then_subtracts_inputs() {
        let mut s = settlement_with(&[]);
        attach(&mut s, &[(ResourceKind::Ordinary, 4)], &[(ResourceKind::Special, 1)]);
        attach(&mut s, &[(ResourceKind::Ordinary, 2), (ResourceKind::Special, 3)], &[]);
        attach(&mut s, &[], &[(ResourceKind::Rare, 2)]);

        let delta = compute_daily_delta(&s).unwrap();
        assert_eq!(delta.get(&ResourceKind::Ordinary), Some(&6));
        assert_eq!(delta.get(&ResourceKind::Special), Some(&2));
        assert_eq!(delta.get(&ResourceKind::Rare), Some(&-2));
        assert!(!delta.contains_key(&ResourceKind::Unique));
    }

    #[test]
    fn district_input_sums_repeated_lines() {
        let mut s = settlement_with(&[]);
        attach(&mut s, &[], &[(ResourceKind::Ordinary, 2), (ResourceKind::Ordinary, 3)]);
        let input = district_input(s.districts.first().unwrap()).unwrap();
        assert_eq!(input.get(&ResourceKind::Ordinary), Some(&5));
    }

    #[test]
    fn consumption_is_not_clamped() {
        let mut s = settlement_with(&[NewResource::material(ResourceKind::Special, "Iron", 1)]);
        attach(&mut s, &[], &[(ResourceKind::Special, 3)]);
        let delta = compute_daily_delta(&s).unwrap();
        apply_daily_delta(&mut s, &delta).unwrap();
        assert_eq!(amount_of_kind(&s, ResourceKind::Special), Some(-2));
    }

    #[test]
    fn advancing_without_districts_returns_immediately() {
        let mut s = settlement_with(&[NewResource::material(ResourceKind::Ordinary, "Wood", 4)]);
        let before = s.clone();
        let total = advance_days(&mut s, i64::MAX).unwrap();
        assert!(total.is_empty());
        assert_eq!(s, before);
    }

    #[test]
    fn missing_kind_gets_new_entry_named_after_kind() {
        let mut s = settlement_with(&[]);
        attach(&mut s, &[(ResourceKind::Mystical, 2)], &[]);
        advance_days(&mut s, 1).unwrap();
        let entry = s.resources.first().unwrap();
        assert_eq!(entry.name, "Mystical");
        assert_eq!(entry.amount, 2);
    }

    #[test]
    fn advance_days_rejects_non_positive() {
        let mut s = settlement_with(&[]);
        assert!(matches!(advance_days(&mut s, 0), Err(WorldError::InvalidArgument(_))));
        assert!(matches!(advance_days(&mut s, -3), Err(WorldError::InvalidArgument(_))));
    }

    #[test]
    fn advance_days_returns_accumulated_change() {
        let mut s = settlement_with(&[NewResource::material(ResourceKind::Ordinary, "Grain", 10)]);
        attach(&mut s, &[(ResourceKind::Ordinary, 3)], &[(ResourceKind::Ordinary, 1)]);
        let total = advance_days(&mut s, 4).unwrap();
        assert_eq!(total.get(&ResourceKind::Ordinary), Some(&8));
        assert_eq!(amount_of_kind(&s, ResourceKind::Ordinary), Some(18));
    }

    proptest! {
        #[test]
        fn multi_day_advance_equals_sequential_days(
            days in 1_i64..6,
            out in 0_u32..50,
            consume in 0_u32..50,
            start in 0_i64..100,
        ) {
            let mut s = settlement_with(&[NewResource::material(ResourceKind::Rare, "Amber", start)]);
            attach(&mut s, &[(ResourceKind::Rare, out), (ResourceKind::Unique, 1)], &[(ResourceKind::Special, consume)]);

            let mut stepped = s.clone();
            for _ in 0..days {
                advance_days(&mut stepped, 1).unwrap();
            }
            advance_days(&mut s, days).unwrap();

            prop_assert_eq!(s.resources, stepped.resources);
        }
    }
}
