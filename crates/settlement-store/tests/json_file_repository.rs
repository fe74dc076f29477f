//! File-backed repository tests against a temporary data directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use settlement_store::{JsonFileRepository, Repository};
use settlement_types::{
    Blueprint, BlueprintId, DistrictGrade, DistrictId, RequiredResource, Resource, ResourceId,
    ResourceKind, Settlement, SettlementId, Spear, SpearId,
};

fn settlement() -> Settlement {
    let founded = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut s = Settlement::new(
        SettlementId::new(1),
        String::from("Ashford"),
        String::from("River town"),
        founded,
    );
    s.resources.push(Resource {
        id: ResourceId::new(1),
        kind: ResourceKind::Ordinary,
        name: String::from("Wood"),
        amount: 10,
        is_tool: false,
    });
    s
}

fn blueprint() -> Blueprint {
    Blueprint {
        id: BlueprintId::new(0),
        name: String::from("Village Square"),
        description: String::new(),
        grade: DistrictGrade::Ordinary,
        production_mode: String::from("Gathering"),
        buff_for_players: String::new(),
        required_resources: vec![RequiredResource::new(ResourceKind::Ordinary, 5)],
        required_tools: vec![String::from("Axe")],
        daily_output: BTreeMap::from([(ResourceKind::Ordinary, 3)]),
        daily_input: Vec::new(),
    }
}

#[tokio::test]
async fn missing_files_load_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path());
    assert!(repo.load_settlements().await.is_empty());
    assert!(repo.load_blueprints().await.is_empty());
    assert!(repo.load_spears().await.is_empty());
}

#[tokio::test]
async fn corrupt_files_load_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path());
    std::fs::write(repo.settlements_path(), "{ not json").unwrap();
    std::fs::write(repo.blueprints_path(), "").unwrap();
    std::fs::write(repo.spears_path(), "[{\"id\": \"one\"}]").unwrap();

    assert!(repo.load_settlements().await.is_empty());
    assert!(repo.load_blueprints().await.is_empty());
    assert!(repo.load_spears().await.is_empty());
}

#[tokio::test]
async fn saved_collections_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path());
    let spear = Spear::new(SpearId::new(1), SettlementId::new(1), DistrictId::new(0));

    repo.save_settlements(&[settlement()]).await.unwrap();
    repo.save_blueprints(&[blueprint()]).await.unwrap();
    repo.save_spears(&[spear.clone()]).await.unwrap();

    assert_eq!(repo.load_settlements().await, vec![settlement()]);
    assert_eq!(repo.load_blueprints().await, vec![blueprint()]);
    assert_eq!(repo.load_spears().await, vec![spear]);
}

#[tokio::test]
async fn files_are_pretty_printed_arrays_with_named_fields() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path());
    repo.save_blueprints(&[blueprint()]).await.unwrap();

    let text = std::fs::read_to_string(repo.blueprints_path()).unwrap();
    assert!(text.starts_with('['));
    assert!(text.contains('\n'));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let first = value.get(0).unwrap();
    assert_eq!(first.get("name").and_then(|v| v.as_str()), Some("Village Square"));
    assert_eq!(
        first
            .get("daily_output")
            .and_then(|o| o.get("Ordinary"))
            .and_then(serde_json::Value::as_u64),
        Some(3)
    );
}

#[tokio::test]
async fn save_creates_missing_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("state").join("world");
    let repo = JsonFileRepository::with_file_names(&nested, "s.json", "b.json", "p.json");

    repo.save_settlements(&[settlement()]).await.unwrap();
    assert!(nested.join("s.json").exists());
    assert_eq!(repo.load_settlements().await.len(), 1);
}
