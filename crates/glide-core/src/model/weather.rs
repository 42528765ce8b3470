//! Weather inputs as delivered by the external provider.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Predominant precipitation kind for a day or hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationKind {
    None,
    Rain,
    Snow,
    Sleet,
    Hail,
    Mixed,
}

impl PrecipitationKind {
    /// Snow or a snow/rain mix.
    pub fn carries_snow(self) -> bool {
        matches!(self, PrecipitationKind::Snow | PrecipitationKind::Mixed)
    }
}

/// One day of observed weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    #[serde(default)]
    pub min_temp_c: Option<f64>,
    #[serde(default)]
    pub max_temp_c: Option<f64>,
    #[serde(default)]
    pub precipitation_mm: Option<f64>,
    #[serde(default)]
    pub snowfall_cm: Option<f64>,
    #[serde(default)]
    pub precipitation_kind: Option<PrecipitationKind>,
    /// Average relative humidity, 0–1.
    #[serde(default)]
    pub humidity: Option<f64>,
}

impl DailySummary {
    /// A day with every optional field unknown.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            min_temp_c: None,
            max_temp_c: None,
            precipitation_mm: None,
            snowfall_cm: None,
            precipitation_kind: None,
            humidity: None,
        }
    }

    pub fn with_temps(mut self, min_c: f64, max_c: f64) -> Self {
        self.min_temp_c = Some(min_c);
        self.max_temp_c = Some(max_c);
        self
    }

    pub fn with_snowfall(mut self, cm: f64) -> Self {
        self.snowfall_cm = Some(cm);
        self
    }

    pub fn with_precipitation(mut self, mm: f64, kind: PrecipitationKind) -> Self {
        self.precipitation_mm = Some(mm);
        self.precipitation_kind = Some(kind);
        self
    }

    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }
}

/// One forecast hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub timestamp: DateTime<Utc>,
    pub temp_c: f64,
    /// 0–1.
    #[serde(default)]
    pub precipitation_probability: f64,
    #[serde(default)]
    pub precipitation_kind: Option<PrecipitationKind>,
    /// Relative humidity, 0–1.
    #[serde(default)]
    pub humidity: Option<f64>,
}

impl HourlyEntry {
    pub fn new(timestamp: DateTime<Utc>, temp_c: f64) -> Self {
        Self {
            timestamp,
            temp_c,
            precipitation_probability: 0.0,
            precipitation_kind: None,
            humidity: None,
        }
    }

    pub fn with_precipitation(mut self, probability: f64, kind: PrecipitationKind) -> Self {
        self.precipitation_probability = probability;
        self.precipitation_kind = Some(kind);
        self
    }

    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    /// Snow-bearing precipitation at or above `probability`.
    pub fn snow_likely(&self, probability: f64) -> bool {
        self.precipitation_kind.is_some_and(PrecipitationKind::carries_snow)
            && self.precipitation_probability >= probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_summary_parses_with_missing_fields() {
        let d: DailySummary = serde_json::from_str(
            r#"{ "date": "2024-01-15", "max_temp_c": -3.5, "precipitation_kind": "snow" }"#,
        )
        .unwrap();
        assert_eq!(d.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(d.max_temp_c, Some(-3.5));
        assert_eq!(d.min_temp_c, None);
        assert_eq!(d.precipitation_kind, Some(PrecipitationKind::Snow));
    }

    #[test]
    fn snow_likely_requires_kind_and_probability() {
        let ts = "2024-01-15T08:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let rain = HourlyEntry::new(ts, 1.0).with_precipitation(0.9, PrecipitationKind::Rain);
        let mixed = HourlyEntry::new(ts, 0.0).with_precipitation(0.45, PrecipitationKind::Mixed);
        assert!(!rain.snow_likely(0.4));
        assert!(mixed.snow_likely(0.4));
        assert!(!mixed.snow_likely(0.7));
        assert!(!HourlyEntry::new(ts, -2.0).snow_likely(0.0));
    }
}
