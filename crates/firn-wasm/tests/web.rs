#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use firn_wasm::{grade, score, WasmSimulation};

fn titanus_json() -> &'static str {
    r#"{"name":"Titanus Glacies","iceThickness":2000,"surfaceArea":500,"stability":100,"tempSensitivity":8}"#
}

fn field(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn constructor_accepts_scenario_json() {
    let sim = WasmSimulation::new(titanus_json()).unwrap();
    assert_eq!(sim.year(), 2024);
    assert_eq!(sim.health(), 100.0);
    assert!(!sim.running());
    assert!(!sim.terminal());
}

#[wasm_bindgen_test]
fn constructor_rejects_malformed_and_invalid_scenarios() {
    let err = WasmSimulation::new("{oops").unwrap_err();
    assert!(err.as_string().unwrap().starts_with("Invalid scenario"));

    let err = WasmSimulation::new(
        r#"{"name":"x","iceThickness":0,"surfaceArea":500,"stability":100,"tempSensitivity":8}"#,
    )
    .unwrap_err();
    assert!(err.as_string().unwrap().contains("thickness"));
}

#[wasm_bindgen_test]
fn tick_advances_only_when_started() {
    let mut sim = WasmSimulation::new(titanus_json()).unwrap();
    assert!(!sim.tick(), "paused simulation must not advance");

    sim.start();
    assert!(sim.tick());
    assert_eq!(sim.year(), 2025);
    assert_eq!(sim.years_survived(), 1);
}

#[wasm_bindgen_test]
fn set_factor_clamps_and_rejects_unknown_names() {
    let mut sim = WasmSimulation::new(titanus_json()).unwrap();
    assert_eq!(sim.set_factor("globalTemp", 9.0).unwrap(), 5.0);
    assert!(sim.set_factor("albedo", 1.0).is_err());
}

#[wasm_bindgen_test]
fn snapshot_is_a_plain_object_with_wire_fields() {
    let mut sim = WasmSimulation::new(titanus_json()).unwrap();
    sim.start();
    sim.tick();

    let snap = sim.snapshot().unwrap();
    assert_eq!(field(&snap, "year").as_f64(), Some(2025.0));
    assert_eq!(field(&snap, "running").as_bool(), Some(true));

    let ice = field(&snap, "ice");
    assert!(field(&ice, "thickness").as_f64().unwrap() > 0.0);
    assert!(field(&ice, "volume").as_f64().unwrap() > 0.0);

    let env = field(&snap, "environment");
    assert_eq!(field(&env, "snowfall").as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn summary_is_null_until_the_run_ends() {
    let mut sim = WasmSimulation::new(titanus_json()).unwrap();
    assert!(sim.summary().unwrap().is_null());

    sim.set_year_cap(Some(2));
    sim.start();
    sim.tick();
    sim.tick();
    assert!(sim.terminal());
    assert_eq!(sim.outcome().as_deref(), Some("survived"));

    let summary = sim.summary().unwrap();
    assert_eq!(field(&summary, "glacierName").as_string().as_deref(), Some("Titanus Glacies"));
    assert_eq!(field(&summary, "yearsSurvived").as_f64(), Some(2.0));
    assert!(field(&summary, "score").as_f64().unwrap() > 0.0);
}

#[wasm_bindgen_test]
fn scoring_functions_are_exposed_to_js() {
    assert_eq!(score(10, 50_000.0, 80.0, 500.0), 1050);
    assert_eq!(grade(1050), "S");
    assert_eq!(grade(99), "D");
}
