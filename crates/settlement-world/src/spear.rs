//! Spears: small military units of residents that yield a daily return.
//!
//! A spear's yield grows geometrically with its grade and linearly with its
//! ascended members:
//!
//! ```text
//! yield = floor(4 * 1.5^grade) + 5 * ascended_members
//! ```
//!
//! The growth term is computed in [`Decimal`] so the floor is exact for the
//! nominal grades 0 to 4 and overflow is detected rather than wrapped.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use settlement_types::{Resident, ResidentId, Spear};

use crate::error::WorldError;

/// Yield of a grade-0 spear with no ascended members.
const BASE_YIELD: u32 = 4;

/// Per-grade multiplier on the base yield (1.5).
const GRADE_GROWTH: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Extra daily yield contributed by each ascended member.
const ASCENDED_BONUS: u64 = 5;

/// Daily yield of one spear.
///
/// # Errors
///
/// Returns [`WorldError::ArithmeticOverflow`] for grades whose growth term
/// does not fit the decimal range.
pub fn yield_per_day(spear: &Spear) -> Result<u64, WorldError> {
    let mut growth = Decimal::from(BASE_YIELD);
    for _ in 0..spear.grade {
        growth = growth
            .checked_mul(GRADE_GROWTH)
            .ok_or(WorldError::ArithmeticOverflow)?;
    }
    let base = growth.floor().to_u64().ok_or(WorldError::ArithmeticOverflow)?;

    let bonus = spear
        .members
        .iter()
        .filter(|m| m.is_ascended)
        .try_fold(0_u64, |acc, _| acc.checked_add(ASCENDED_BONUS))
        .ok_or(WorldError::ArithmeticOverflow)?;

    base.checked_add(bonus).ok_or(WorldError::ArithmeticOverflow)
}

/// Combined daily yield of every spear given.
///
/// # Errors
///
/// Returns [`WorldError::ArithmeticOverflow`] if any yield or the sum overflows.
pub fn settlement_daily_yield(spears: &[Spear]) -> Result<u64, WorldError> {
    spears.iter().try_fold(0_u64, |total, spear| {
        total
            .checked_add(yield_per_day(spear)?)
            .ok_or(WorldError::ArithmeticOverflow)
    })
}

/// Make `resident_id` the spear's leader.
///
/// # Errors
///
/// Returns [`WorldError::NotAMember`] unless the resident is a member.
pub fn set_leader(spear: &mut Spear, resident_id: ResidentId) -> Result<(), WorldError> {
    if !spear.has_member(resident_id) {
        return Err(WorldError::NotAMember {
            spear: spear.id,
            resident: resident_id,
        });
    }
    spear.leader_id = Some(resident_id);
    tracing::info!(spear = %spear.id, leader = %resident_id, "Set spear leader");
    Ok(())
}

/// Copy `resident` into the spear's member list.
///
/// Returns `false` without changing anything if the resident is already a
/// member.
pub fn add_member(spear: &mut Spear, resident: &Resident) -> bool {
    if spear.has_member(resident.id) {
        return false;
    }
    spear.members.push(resident.clone());
    tracing::debug!(spear = %spear.id, resident = %resident.id, "Added spear member");
    true
}
