//! Classifier output: snow type, confidence, machine-readable reasons and the
//! metrics the decision was based on.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::snow_type::SnowType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Stable reason identifiers. Localisation layers key their text on
/// [`ReasonCode::as_str`] and interpolate the reason's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    // ── Daily history ─────────────────────────────────────────────────────
    #[serde(rename = "wet.very_wet")]
    VeryWet,
    #[serde(rename = "wet.above_threshold")]
    WetAboveThreshold,
    #[serde(rename = "new_snow.significant")]
    SignificantSnowfall,
    #[serde(rename = "new_snow.moist")]
    MoistNewSnow,
    #[serde(rename = "refrozen.after_melt")]
    RefrozenAfterMelt,
    #[serde(rename = "refrozen.no_new_cover")]
    NoNewCover,
    #[serde(rename = "moist.humid_near_zero")]
    HumidNearZero,
    #[serde(rename = "aging.light_snowfall")]
    LightSnowfall,
    #[serde(rename = "aging.recent_snow")]
    RecentSnow,
    #[serde(rename = "aging.fine_grained")]
    FineGrainedAge,
    #[serde(rename = "aging.cold_dry")]
    ColdDry,
    #[serde(rename = "aging.old_snow")]
    OldSnow,
    #[serde(rename = "aging.moist_near_zero")]
    MoistNearZero,
    // ── Forecast ──────────────────────────────────────────────────────────
    #[serde(rename = "forecast.snow_imminent")]
    SnowImminent,
    #[serde(rename = "forecast.heavy_snow")]
    HeavySnowImminent,
    #[serde(rename = "forecast.wet_now")]
    WetNow,
    #[serde(rename = "forecast.warm_hours")]
    WarmHours,
    #[serde(rename = "forecast.sustained_warmth")]
    SustainedWarmth,
    #[serde(rename = "forecast.freezing_now")]
    FreezingNow,
    #[serde(rename = "history.snow_yesterday")]
    SnowYesterday,
    #[serde(rename = "history.light_snow_yesterday")]
    LightSnowYesterday,
    #[serde(rename = "history.no_snow_in_window")]
    NoSnowInWindow,
    #[serde(rename = "history.wet_yesterday")]
    WetYesterday,
    // ── Inputs ────────────────────────────────────────────────────────────
    #[serde(rename = "defaults.missing_temperature")]
    MissingTemperature,
    #[serde(rename = "defaults.missing_humidity")]
    MissingHumidity,
}

impl ReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::VeryWet => "wet.very_wet",
            ReasonCode::WetAboveThreshold => "wet.above_threshold",
            ReasonCode::SignificantSnowfall => "new_snow.significant",
            ReasonCode::MoistNewSnow => "new_snow.moist",
            ReasonCode::RefrozenAfterMelt => "refrozen.after_melt",
            ReasonCode::NoNewCover => "refrozen.no_new_cover",
            ReasonCode::HumidNearZero => "moist.humid_near_zero",
            ReasonCode::LightSnowfall => "aging.light_snowfall",
            ReasonCode::RecentSnow => "aging.recent_snow",
            ReasonCode::FineGrainedAge => "aging.fine_grained",
            ReasonCode::ColdDry => "aging.cold_dry",
            ReasonCode::OldSnow => "aging.old_snow",
            ReasonCode::MoistNearZero => "aging.moist_near_zero",
            ReasonCode::SnowImminent => "forecast.snow_imminent",
            ReasonCode::HeavySnowImminent => "forecast.heavy_snow",
            ReasonCode::WetNow => "forecast.wet_now",
            ReasonCode::WarmHours => "forecast.warm_hours",
            ReasonCode::SustainedWarmth => "forecast.sustained_warmth",
            ReasonCode::FreezingNow => "forecast.freezing_now",
            ReasonCode::SnowYesterday => "history.snow_yesterday",
            ReasonCode::LightSnowYesterday => "history.light_snow_yesterday",
            ReasonCode::NoSnowInWindow => "history.no_snow_in_window",
            ReasonCode::WetYesterday => "history.wet_yesterday",
            ReasonCode::MissingTemperature => "defaults.missing_temperature",
            ReasonCode::MissingHumidity => "defaults.missing_humidity",
        }
    }
}

/// One explanation step: a code plus its interpolation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub code: ReasonCode,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl Reason {
    pub fn new(code: ReasonCode) -> Self {
        Self { code, params: BTreeMap::new() }
    }

    /// Degrees Celsius or centimetres, one decimal.
    pub fn with_measure(mut self, key: &str, value: f64) -> Self {
        self.params.insert(key.to_string(), format!("{value:.1}"));
        self
    }

    /// Humidity or probability, two decimals.
    pub fn with_fraction(mut self, key: &str, value: f64) -> Self {
        self.params.insert(key.to_string(), format!("{value:.2}"));
        self
    }

    pub fn with_count(mut self, key: &str, value: impl Into<u64>) -> Self {
        self.params.insert(key.to_string(), value.into().to_string());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Supporting numbers echoed alongside the classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMetrics {
    /// Snowfall in cm that the decision considered recent.
    pub recent_snow_cm: f64,
    pub min_temp_c: Option<f64>,
    pub max_temp_c: Option<f64>,
    /// Forecast hours above 0 °C; `None` on the daily path.
    pub hours_above_freezing: Option<u32>,
    /// Forecast hours at or below the cold threshold; `None` on the daily path.
    pub hours_below_cold: Option<u32>,
    pub refreeze_detected: bool,
    pub days_since_melt: Option<u32>,
    pub days_since_significant_snow: Option<u32>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowSurfaceAssessment {
    pub timestamp: DateTime<Utc>,
    pub snow_type: SnowType,
    pub confidence: Confidence,
    pub reasons: Vec<Reason>,
    pub metrics: SurfaceMetrics,
}

impl SnowSurfaceAssessment {
    pub fn has_reason(&self, code: ReasonCode) -> bool {
        self.reasons.iter().any(|r| r.code == code)
    }

    pub fn reason(&self, code: ReasonCode) -> Option<&Reason> {
        self.reasons.iter().find(|r| r.code == code)
    }
}

/// Midnight UTC on `date`; the timestamp daily assessments carry.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_serialize_as_stable_ids() {
        for code in [ReasonCode::VeryWet, ReasonCode::SnowImminent, ReasonCode::MissingHumidity] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn reason_params_use_fixed_precision() {
        let r = Reason::new(ReasonCode::SignificantSnowfall)
            .with_measure("snow_cm", 4.26)
            .with_fraction("humidity", 0.8)
            .with_count("days", 3u32);
        assert_eq!(r.param("snow_cm"), Some("4.3"));
        assert_eq!(r.param("humidity"), Some("0.80"));
        assert_eq!(r.param("days"), Some("3"));
    }

    #[test]
    fn confidence_orders_low_to_high() {
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
    }
}
