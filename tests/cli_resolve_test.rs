//! Integration tests for `plumb resolve`.

mod common;

use common::{TestEnv, parse_json};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_resolve_empty_state_keeps_sections() {
    let env = TestEnv::new();
    env.write_state("state.json", &json!({}));

    let output = env
        .plumb()
        .args(["resolve", "state.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let resolved = parse_json(&output.stdout);

    assert_eq!(resolved["dwellingDetails"], json!({}));
    assert_eq!(resolved["livingSpaceFabric"], json!({ "ceilingsAndRoofs": {} }));
    assert_eq!(
        resolved["infiltrationAndVentilation"],
        json!({ "combustionAppliances": {} })
    );
    assert_eq!(resolved["domesticHotWater"], json!({ "pipework": {} }));
    assert_eq!(resolved["pvAndBatteries"], json!({}));
}

#[test]
fn test_resolve_only_completed_forms() {
    let env = TestEnv::new();
    env.write_state(
        "state.json",
        &json!({
            "dwellingDetails": {
                "generalSpecifications": {
                    "data": { "typeOfDwelling": "house", "storeysInDwelling": 2 },
                    "complete": true
                },
                "externalFactors": {
                    "data": { "altitude": 30 }
                }
            },
            "pvAndBatteries": {
                "pvArrays": {
                    "data": [{ "data": { "name": "PV 1", "peakPower": 4 }, "complete": true }],
                    "complete": true
                },
                "electricBattery": {
                    "data": [{ "data": { "name": "Battery" } }]
                }
            }
        }),
    );

    let output = env
        .plumb()
        .args(["resolve", "state.json"])
        .output()
        .unwrap();
    let resolved = parse_json(&output.stdout);

    assert_eq!(
        resolved["dwellingDetails"]["generalSpecifications"],
        json!({ "typeOfDwelling": "house", "storeysInDwelling": 2 })
    );
    assert!(resolved["dwellingDetails"].get("externalFactors").is_none());
    assert_eq!(resolved["pvAndBatteries"]["pvArrays"][0]["name"], "PV 1");
    assert!(resolved["pvAndBatteries"].get("electricBattery").is_none());
}

#[test]
fn test_resolve_human_is_pretty() {
    let env = TestEnv::new();
    env.write_state("state.json", &json!({}));

    env.plumb()
        .args(["-H", "resolve", "state.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n"))
        .stdout(predicate::str::contains("  \"dwellingDetails\": {}"));
}
