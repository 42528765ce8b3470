//! Tunable classifier thresholds.
//!
//! Defaults are the calibrated values the rule tables were written against.
//! A JSON override may name any subset of fields; the rest keep their default.

use serde::{Deserialize, Serialize};

use crate::error::{GlideError, Result};

/// Every constant the tracker, both classifiers and the snowfall estimator read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// cm/day, default 2.0. Snowfall at or above this resets surface age.
    pub significant_snow_cm: f64,
    /// cm/day, default 0.5. Leftover snowfall above this keeps a fine surface.
    pub light_snow_cm: f64,
    /// °C, default 0.5. Max temperature at or above this means liquid water.
    pub wet_c: f64,
    /// °C, default 2.0. Wet surfaces above this are very wet.
    pub very_wet_c: f64,
    /// °C, default −1.0. Max temperature at or above this counts as moist.
    pub moist_c: f64,
    /// 0–1, default 0.80.
    pub humid: f64,
    /// °C, default −12.0. Average below this is too cold for moist metamorphism.
    pub very_cold_avg_c: f64,
    /// °C, default −7.0. Average at or below this keeps fine grains crisp.
    pub markedly_cold_avg_c: f64,
    /// °C, default −7.0. Hourly temperature at or below this counts as a cold hour.
    pub cold_hour_c: f64,
    /// days, default 3. A melt older than this no longer influences the surface.
    pub melt_relevance_days: u32,
    /// days, default 3. Snow age assumed when the lookback has no significant snowfall.
    pub unknown_snow_age_days: u32,
    /// days, default 3. Significant snow this recent keeps the surface fine-grained.
    pub recent_snow_days: u32,
    /// days, default 7. Dry snow at least this old is confidently old-grained.
    pub long_aged_days: u32,
    /// hours, default 6. Forecast lookahead for the current-conditions path.
    pub forecast_window_hours: usize,
    /// hours, default 3. Above-freezing hours in the window that make it wet.
    pub wet_hours: u32,
    /// 0–1, default 0.4. Snow probability that makes snowfall imminent.
    pub imminent_probability: f64,
    /// 0–1, default 0.7. Snow probability that makes imminent snowfall heavy.
    pub heavy_probability: f64,
    /// °C, default −5.0. Substituted for a missing daily minimum.
    pub default_min_c: f64,
    /// °C, default 0.0. Substituted for a missing daily maximum.
    pub default_max_c: f64,
    /// 0–1, default 0.65. Substituted for missing humidity.
    pub default_humidity: f64,
    /// Snow:water depth ratio at 0 °C and above, default 5.
    pub snow_ratio_warm: f64,
    /// Snow:water depth ratio at `snow_ratio_cold_c` and below, default 15.
    pub snow_ratio_cold: f64,
    /// °C, default −10.0.
    pub snow_ratio_cold_c: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            significant_snow_cm: 2.0,
            light_snow_cm: 0.5,
            wet_c: 0.5,
            very_wet_c: 2.0,
            moist_c: -1.0,
            humid: 0.80,
            very_cold_avg_c: -12.0,
            markedly_cold_avg_c: -7.0,
            cold_hour_c: -7.0,
            melt_relevance_days: 3,
            unknown_snow_age_days: 3,
            recent_snow_days: 3,
            long_aged_days: 7,
            forecast_window_hours: 6,
            wet_hours: 3,
            imminent_probability: 0.4,
            heavy_probability: 0.7,
            default_min_c: -5.0,
            default_max_c: 0.0,
            default_humidity: 0.65,
            snow_ratio_warm: 5.0,
            snow_ratio_cold: 15.0,
            snow_ratio_cold_c: -10.0,
        }
    }
}

impl Thresholds {
    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let t: Thresholds = serde_json::from_str(json)?;
        t.validate()?;
        Ok(t)
    }

    /// Reject threshold sets the rule tables cannot be evaluated against.
    pub fn validate(&self) -> Result<()> {
        if !(self.light_snow_cm >= 0.0 && self.light_snow_cm < self.significant_snow_cm) {
            return Err(invalid(
                "light_snow_cm",
                format!("must be in [0, significant_snow_cm), got {}", self.light_snow_cm),
            ));
        }
        if self.very_wet_c < self.wet_c {
            return Err(invalid(
                "very_wet_c",
                format!("{} is below wet_c {}", self.very_wet_c, self.wet_c),
            ));
        }
        if self.moist_c >= self.wet_c {
            return Err(invalid(
                "moist_c",
                format!("{} must be below wet_c {}", self.moist_c, self.wet_c),
            ));
        }
        for (name, p) in [
            ("humid", self.humid),
            ("imminent_probability", self.imminent_probability),
            ("heavy_probability", self.heavy_probability),
            ("default_humidity", self.default_humidity),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(name, format!("{p} is outside 0–1")));
            }
        }
        if self.heavy_probability < self.imminent_probability {
            return Err(invalid(
                "heavy_probability",
                "must not be below imminent_probability".to_string(),
            ));
        }
        if self.default_min_c > self.default_max_c {
            return Err(invalid(
                "default_min_c",
                "must not exceed default_max_c".to_string(),
            ));
        }
        if self.forecast_window_hours == 0 {
            return Err(invalid("forecast_window_hours", "must be at least 1".to_string()));
        }
        if self.snow_ratio_warm <= 0.0 || self.snow_ratio_cold < self.snow_ratio_warm {
            return Err(invalid(
                "snow_ratio_cold",
                "ratios must be positive and cold ≥ warm".to_string(),
            ));
        }
        if self.snow_ratio_cold_c >= 0.0 {
            return Err(invalid("snow_ratio_cold_c", "must be below 0 °C".to_string()));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> GlideError {
    GlideError::InvalidThreshold { name, reason }
}
