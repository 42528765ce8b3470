use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use glide_core::recommend::{recommend_or_nearest, Lookup};
use glide_core::report::{ConditionsReport, WeatherPayload};
use glide_core::{Candidate, SnowType, Thresholds};

/// Classify a weather payload (`{ daily: [...], hourly: [...] }`).
///
/// `thresholds_json` may override any subset of the default thresholds.
/// Returns the conditions report as a plain JS object.
#[wasm_bindgen]
pub fn classify(payload_json: &str, thresholds_json: Option<String>) -> Result<JsValue, JsValue> {
    let report = build_report(payload_json, thresholds_json.as_deref()).map_err(to_js)?;
    to_value(&report)
}

/// Rank candidates for `snow_type` (kebab-case id) at `temperature` °C.
///
/// Returns `{ kind: "matches", recommendations }`, `{ kind: "nearest", temperature }`
/// or `{ kind: "uncovered" }`.
#[wasm_bindgen]
pub fn recommend(candidates_json: &str, temperature: f64, snow_type: &str) -> Result<JsValue, JsValue> {
    let candidates = parse_candidates(candidates_json).map_err(to_js)?;
    let snow_type = parse_snow_type(snow_type).map_err(to_js)?;
    let lookup: Lookup<'_> = recommend_or_nearest(&candidates, temperature, snow_type);
    to_value(&lookup)
}

fn build_report(payload_json: &str, thresholds_json: Option<&str>) -> Result<ConditionsReport> {
    let payload = WeatherPayload::from_json(payload_json).context("invalid weather payload")?;
    let thresholds = match thresholds_json {
        Some(json) => Thresholds::from_json(json).context("invalid thresholds")?,
        None => Thresholds::default(),
    };
    Ok(ConditionsReport::build(&payload, &thresholds))
}

fn parse_candidates(json: &str) -> Result<Vec<Candidate>> {
    serde_json::from_str(json).context("invalid candidates")
}

fn parse_snow_type(id: &str) -> Result<SnowType> {
    SnowType::from_id(id).ok_or_else(|| anyhow!("unknown snow type {id:?}"))
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

// Plain objects rather than JS Maps for the BTreeMap fields.
fn to_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}
