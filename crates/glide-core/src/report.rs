//! One-call conditions report over a weather payload.

use serde::{Deserialize, Serialize};

use crate::classify::current::classify_current_with;
use crate::classify::historical::classify_history_with;
use crate::config::Thresholds;
use crate::error::Result;
use crate::model::assessment::SnowSurfaceAssessment;
use crate::model::snow_type::SnowType;
use crate::model::weather::{DailySummary, HourlyEntry};

/// Daily history plus hourly forecast, as delivered by a weather provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub daily: Vec<DailySummary>,
    #[serde(default)]
    pub hourly: Vec<HourlyEntry>,
}

impl WeatherPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionsReport {
    /// Historical assessments, aligned with `payload.daily`.
    pub history: Vec<SnowSurfaceAssessment>,
    /// `None` when the payload has no hourly entries.
    pub current: Option<SnowSurfaceAssessment>,
    /// Current snow type, else the newest historical one.
    pub snow_type: Option<SnowType>,
}

impl ConditionsReport {
    pub fn build(payload: &WeatherPayload, t: &Thresholds) -> Self {
        let history = classify_history_with(&payload.daily, t);

        // Only the calendar day before the first forecast hour counts.
        let yesterday = payload
            .hourly
            .first()
            .and_then(|h| h.timestamp.date_naive().pred_opt())
            .and_then(|date| {
                payload
                    .daily
                    .iter()
                    .zip(&history)
                    .find(|(day, _)| day.date == date)
                    .map(|(_, assessment)| assessment)
            });

        let current = classify_current_with(&payload.hourly, &payload.daily, yesterday, t);
        let snow_type = current.as_ref().map(|c| c.snow_type).or_else(|| {
            payload
                .daily
                .iter()
                .zip(&history)
                .max_by_key(|(day, _)| day.date)
                .map(|(_, a)| a.snow_type)
        });

        tracing::debug!(
            days = history.len(),
            has_current = current.is_some(),
            snow_type = ?snow_type,
            "built conditions report"
        );
        Self { history, current, snow_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::assessment::ReasonCode;

    const PAYLOAD: &str = r#"{
        "daily": [
            { "date": "2024-01-03", "min_temp_c": -6.0, "max_temp_c": -2.0, "snowfall_cm": 0.0, "humidity": 0.6 },
            { "date": "2024-01-01", "min_temp_c": 1.0, "max_temp_c": 5.0, "snowfall_cm": 0.0, "humidity": 0.9 },
            { "date": "2024-01-02", "min_temp_c": -8.0, "max_temp_c": -6.0, "snowfall_cm": 0.0, "humidity": 0.6 }
        ],
        "hourly": [
            { "timestamp": "2024-01-04T08:00:00Z", "temp_c": -5.0, "humidity": 0.6 },
            { "timestamp": "2024-01-04T09:00:00Z", "temp_c": -4.0 },
            { "timestamp": "2024-01-04T10:00:00Z", "temp_c": -3.0 }
        ]
    }"#;

    #[test]
    fn history_aligned_with_payload_order() {
        let payload = WeatherPayload::from_json(PAYLOAD).unwrap();
        let report = ConditionsReport::build(&payload, &Thresholds::default());
        assert_eq!(report.history.len(), 3);
        assert_eq!(report.history[1].snow_type, SnowType::VeryWetCorn);
        assert_eq!(report.history[2].snow_type, SnowType::FrozenCorn);
        assert_eq!(report.history[0].snow_type, SnowType::FrozenCorn);
    }

    #[test]
    fn current_sees_refreeze_after_melt() {
        let payload = WeatherPayload::from_json(PAYLOAD).unwrap();
        let report = ConditionsReport::build(&payload, &Thresholds::default());
        let current = report.current.unwrap();
        assert_eq!(current.snow_type, SnowType::FrozenCorn);
        assert!(current.has_reason(ReasonCode::RefrozenAfterMelt));
        assert_eq!(report.snow_type, Some(SnowType::FrozenCorn));
    }

    #[test]
    fn falls_back_to_newest_history_without_forecast() {
        let mut payload = WeatherPayload::from_json(PAYLOAD).unwrap();
        payload.hourly.clear();
        let report = ConditionsReport::build(&payload, &Thresholds::default());
        assert!(report.current.is_none());
        assert_eq!(report.snow_type, Some(report.history[0].snow_type));
    }

    #[test]
    fn week_old_melt_does_not_refreeze_today() {
        let payload = WeatherPayload::from_json(
            r#"{
                "daily": [
                    { "date": "2024-01-01", "min_temp_c": -1.0, "max_temp_c": 4.0, "snowfall_cm": 0.0, "humidity": 0.6 }
                ],
                "hourly": [
                    { "timestamp": "2024-01-08T08:00:00Z", "temp_c": -8.0, "humidity": 0.6 },
                    { "timestamp": "2024-01-08T09:00:00Z", "temp_c": -8.0 }
                ]
            }"#,
        )
        .unwrap();
        let report = ConditionsReport::build(&payload, &Thresholds::default());
        assert_eq!(report.history[0].snow_type, SnowType::VeryWetCorn);
        let current = report.current.unwrap();
        assert_ne!(current.snow_type, SnowType::FrozenCorn);
        assert!(!current.has_reason(ReasonCode::WetYesterday));
        assert_eq!(current.metrics.days_since_melt, Some(7));
    }

    #[test]
    fn empty_payload_yields_empty_report() {
        let report = ConditionsReport::build(&WeatherPayload::default(), &Thresholds::default());
        assert!(report.history.is_empty());
        assert!(report.current.is_none());
        assert!(report.snow_type.is_none());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(WeatherPayload::from_json(r#"{ "daily": 3 }"#).is_err());
    }
}
