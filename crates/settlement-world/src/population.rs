//! Residents and their placement in districts.
//!
//! Resident ids are unique across every settlement, so id assignment looks
//! at the whole population. A resident works in at most one district; the
//! district keeps the matching id in its `resident_ids`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use settlement_types::{
    DistrictId, NewResident, Resident, ResidentId, Settlement, next_id,
};

use crate::error::WorldError;

/// Id handed to the very first resident.
const FIRST_RESIDENT_ID: ResidentId = ResidentId::new(1);

/// The next unused resident id across all `settlements`.
///
/// # Errors
///
/// Returns [`WorldError::ArithmeticOverflow`] if the id space is exhausted.
pub fn next_resident_id(settlements: &[Settlement]) -> Result<ResidentId, WorldError> {
    next_id(
        settlements
            .iter()
            .flat_map(|s| s.residents.iter().map(|r| r.id)),
        FIRST_RESIDENT_ID,
    )
    .ok_or(WorldError::ArithmeticOverflow)
}

/// Add a resident with the given id to `settlement`.
///
/// When `new.district_id` is set the resident is placed in that district.
///
/// # Errors
///
/// Returns [`WorldError::DistrictNotFound`] if the requested district is not
/// built in this settlement; nothing is added then.
pub fn admit_resident(
    settlement: &mut Settlement,
    id: ResidentId,
    new: &NewResident,
    now: DateTime<Utc>,
) -> Result<(), WorldError> {
    if let Some(district_id) = new.district_id {
        let district = settlement
            .district_mut(district_id)
            .ok_or(WorldError::DistrictNotFound(district_id))?;
        district.resident_ids.push(id);
    }

    settlement.residents.push(Resident {
        id,
        settlement_id: settlement.id,
        district_id: new.district_id,
        name: new.name.clone(),
        occupation: new.occupation.clone(),
        description: new.description.clone(),
        is_important: new.is_important,
        is_ascended: new.is_ascended,
        ascension_grade: new.ascension_grade,
        star_coins: 0,
        coins: 0,
        date_added: now,
    });
    tracing::info!(settlement = %settlement.id, resident = %id, name = %new.name, "Added resident");
    Ok(())
}

/// Move a resident into a district, removing it from any previous one.
///
/// # Errors
///
/// [`WorldError::DistrictNotFound`] or [`WorldError::ResidentNotFound`];
/// nothing changes then.
pub fn assign_to_district(
    settlement: &mut Settlement,
    resident_id: ResidentId,
    district_id: DistrictId,
) -> Result<(), WorldError> {
    if settlement.district(district_id).is_none() {
        return Err(WorldError::DistrictNotFound(district_id));
    }
    let resident = settlement
        .residents
        .iter_mut()
        .find(|r| r.id == resident_id)
        .ok_or(WorldError::ResidentNotFound(resident_id))?;
    resident.district_id = Some(district_id);

    for district in &mut settlement.districts {
        if district.id == district_id {
            if !district.resident_ids.contains(&resident_id) {
                district.resident_ids.push(resident_id);
            }
        } else {
            district.resident_ids.retain(|&r| r != resident_id);
        }
    }
    Ok(())
}

/// Residents working in `district_id`.
pub fn residents_in_district(settlement: &Settlement, district_id: DistrictId) -> Vec<&Resident> {
    settlement
        .residents
        .iter()
        .filter(|r| r.district_id == Some(district_id))
        .collect()
}

/// How many districts of each name the settlement has built.
pub fn built_district_counts(settlement: &Settlement) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for district in &settlement.districts {
        let count: &mut usize = counts.entry(district.name.clone()).or_default();
        *count = count.saturating_add(1);
    }
    counts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use settlement_types::{BuiltDistrict, SettlementId};

    use super::*;
    use crate::test_support::{blueprint, settlement_with};

    fn with_districts(names: &[&str]) -> Settlement {
        let mut s = settlement_with(&[]);
        for (i, name) in names.iter().enumerate() {
            let id = DistrictId::new(u32::try_from(i).unwrap());
            s.districts.push(BuiltDistrict::from_blueprint(
                &blueprint(0, name),
                id,
                s.id,
                Utc::now(),
            ));
        }
        s
    }

    fn newcomer(name: &str) -> NewResident {
        NewResident {
            name: name.to_owned(),
            ..NewResident::default()
        }
    }

    #[test]
    fn resident_ids_span_every_settlement() {
        let mut a = settlement_with(&[]);
        let mut b = settlement_with(&[]);
        b.id = SettlementId::new(2);
        assert_eq!(next_resident_id(&[]).unwrap(), ResidentId::new(1));

        admit_resident(&mut a, ResidentId::new(3), &newcomer("Ada"), Utc::now()).unwrap();
        admit_resident(&mut b, ResidentId::new(8), &newcomer("Bo"), Utc::now()).unwrap();
        assert_eq!(next_resident_id(&[a, b]).unwrap(), ResidentId::new(9));
    }

    #[test]
    fn admit_into_missing_district_adds_nothing() {
        let mut s = with_districts(&["Square"]);
        let mut new = newcomer("Cai");
        new.district_id = Some(DistrictId::new(5));
        assert_eq!(
            admit_resident(&mut s, ResidentId::new(1), &new, Utc::now()),
            Err(WorldError::DistrictNotFound(DistrictId::new(5)))
        );
        assert!(s.residents.is_empty());
    }

    #[test]
    fn admit_into_district_links_both_sides() {
        let mut s = with_districts(&["Square"]);
        let mut new = newcomer("Dag");
        new.district_id = Some(DistrictId::new(0));
        admit_resident(&mut s, ResidentId::new(1), &new, Utc::now()).unwrap();
        assert_eq!(residents_in_district(&s, DistrictId::new(0)).len(), 1);
        assert_eq!(
            s.district(DistrictId::new(0)).map(|d| d.resident_ids.clone()),
            Some(vec![ResidentId::new(1)])
        );
    }

    #[test]
    fn assign_moves_between_districts() {
        let mut s = with_districts(&["Square", "Mill"]);
        let mut new = newcomer("Eir");
        new.district_id = Some(DistrictId::new(0));
        admit_resident(&mut s, ResidentId::new(1), &new, Utc::now()).unwrap();

        assign_to_district(&mut s, ResidentId::new(1), DistrictId::new(1)).unwrap();
        assert!(residents_in_district(&s, DistrictId::new(0)).is_empty());
        assert_eq!(residents_in_district(&s, DistrictId::new(1)).len(), 1);
        assert!(s.district(DistrictId::new(0)).is_some_and(|d| d.resident_ids.is_empty()));

        // Re-assigning to the same district does not duplicate the link.
        assign_to_district(&mut s, ResidentId::new(1), DistrictId::new(1)).unwrap();
        assert!(s.district(DistrictId::new(1)).is_some_and(|d| d.resident_ids.len() == 1));
    }

    #[test]
    fn assign_validates_both_ids() {
        let mut s = with_districts(&["Square"]);
        assert_eq!(
            assign_to_district(&mut s, ResidentId::new(1), DistrictId::new(0)),
            Err(WorldError::ResidentNotFound(ResidentId::new(1)))
        );
        assert_eq!(
            assign_to_district(&mut s, ResidentId::new(1), DistrictId::new(3)),
            Err(WorldError::DistrictNotFound(DistrictId::new(3)))
        );
    }

    #[test]
    fn counts_group_by_district_name() {
        let s = with_districts(&["Mill", "Square", "Mill"]);
        let counts = built_district_counts(&s);
        assert_eq!(counts.get("Mill"), Some(&2));
        assert_eq!(counts.get("Square"), Some(&1));
    }
}
