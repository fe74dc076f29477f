//! Fixtures shared by the unit tests of this crate.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use settlement_ledger::Ledger;
use settlement_types::{
    Blueprint, BlueprintId, DistrictGrade, NewResource, Settlement, SettlementId,
};

/// A cost-free, production-free blueprint.
pub(crate) fn blueprint(id: u32, name: &str) -> Blueprint {
    Blueprint {
        id: BlueprintId::new(id),
        name: name.to_owned(),
        description: String::new(),
        grade: DistrictGrade::Ordinary,
        production_mode: String::new(),
        buff_for_players: String::new(),
        required_resources: Vec::new(),
        required_tools: Vec::new(),
        daily_output: BTreeMap::new(),
        daily_input: Vec::new(),
    }
}

/// Settlement 1 holding the given resources, filed through the ledger.
pub(crate) fn settlement_with(resources: &[NewResource]) -> Settlement {
    let founded = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let mut settlement = Settlement::new(
        SettlementId::new(1),
        String::from("Ashford"),
        String::new(),
        founded,
    );
    let mut ledger = Ledger::new(&mut settlement.resources);
    for resource in resources {
        ledger.upsert(resource).unwrap();
    }
    settlement
}
