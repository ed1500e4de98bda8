//! Command execution against a real SQLite snapshot.

use super::helpers::{SnapshotDir, ids};
use super::*;
use crate::near::{NearConfig, execute_near};
use crate::recommend::{RecommendConfig, execute_recommend};
use crate::search::{SearchConfig, execute_search};
use bena_core::{EmptyReason, PlaceId};
use bena_ranker::{EngineConfig, HybridWeights, RecommendationRequest, Strategy};
use rstest::{fixture, rstest};

#[fixture]
fn snapshot() -> SnapshotDir {
    SnapshotDir::new()
}

fn recommend_config(snapshot: &SnapshotDir, request: RecommendationRequest) -> RecommendConfig {
    RecommendConfig {
        database: snapshot.database(),
        request,
        engine: EngineConfig::default(),
    }
}

#[rstest]
fn recommend_orders_by_distance(snapshot: SnapshotDir) {
    let request = RecommendationRequest::new("U1")
        .with_method("near_bookmarks")
        .with_length(2);
    let outcome = execute_recommend(&recommend_config(&snapshot, request)).expect("recommend");
    assert_eq!(outcome.method, Strategy::NearBookmarks);
    assert_eq!(ids(&outcome.result), ["P2", "P3"]);
}

#[rstest]
fn recommend_reads_interactions_as_activity(snapshot: SnapshotDir) {
    let request = RecommendationRequest::new("U2").with_length(5);
    let outcome = execute_recommend(&recommend_config(&snapshot, request)).expect("recommend");
    assert_eq!(outcome.method, Strategy::Hybrid);
    assert!(outcome.warnings.is_empty());
    assert!(!ids(&outcome.result).contains(&"P3"));
}

#[rstest]
fn recommend_rejects_invalid_weights(snapshot: SnapshotDir) {
    let mut config = recommend_config(&snapshot, RecommendationRequest::new("U1"));
    config.engine.hybrid_weights = HybridWeights {
        content: f64::NAN,
        proximity: 0.4,
    };
    let err = execute_recommend(&config).expect_err("invalid weights");
    match err {
        CliError::InvalidConfig(_) => {}
        other => panic!("expected InvalidConfig, found {other:?}"),
    }
}

#[rstest]
fn search_returns_both_beaches(snapshot: SnapshotDir) {
    let config = SearchConfig {
        database: snapshot.database(),
        query: "beach".to_owned(),
        length: None,
        engine: EngineConfig::default(),
    };
    let results = execute_search(&config).expect("search");
    assert_eq!(ids(&results.result), ["P1", "P2"]);
    assert_eq!(results.length, 10);
}

#[rstest]
fn near_reports_unknown_place(snapshot: SnapshotDir) {
    let config = NearConfig {
        database: snapshot.database(),
        place_id: PlaceId::from("P404"),
        length: None,
        radius_km: None,
    };
    let nearby = execute_near(&config).expect("near");
    assert!(nearby.result.is_empty());
    assert!(matches!(
        nearby.result.reason(),
        Some(EmptyReason::PlaceNotFound { .. })
    ));
}

#[rstest]
fn database_without_tables_fails_preparation(snapshot: SnapshotDir) {
    let config = NearConfig {
        database: snapshot.empty_database(),
        place_id: PlaceId::from("P1"),
        length: None,
        radius_km: None,
    };
    let err = execute_near(&config).expect_err("no places table");
    match err {
        CliError::PrepareSnapshot { path, .. } => assert_eq!(path, config.database),
        other => panic!("expected PrepareSnapshot, found {other:?}"),
    }
}

#[rstest]
fn output_is_pretty_json_with_renamed_fields(snapshot: SnapshotDir) {
    let config = NearConfig {
        database: snapshot.database(),
        place_id: PlaceId::from("P1"),
        length: Some(9),
        radius_km: Some(5.0),
    };
    let nearby = execute_near(&config).expect("near");
    let mut buffer = Vec::new();
    write_json(&mut buffer, &nearby).expect("write output");

    let text = String::from_utf8(buffer).expect("utf-8 output");
    assert!(text.ends_with("}\n"));
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    assert_eq!(value["searched_place_id"], "P1");
    assert_eq!(value["length"], 5);
    assert_eq!(value["radius"], 5.0);
    assert_eq!(value["warnings"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["near_places"]["places"][0]["id"], "P2");
}
