//! A daily summary with every optional field resolved to a number.

use crate::config::Thresholds;
use crate::model::weather::DailySummary;

use super::estimation::estimate_snowfall_cm;

/// Resolved view of one [`DailySummary`].
///
/// Missing temperatures and humidity take the configured defaults; missing
/// snowfall falls back to the precipitation estimate and then to 0 cm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayReading {
    pub min_c: f64,
    pub max_c: f64,
    pub humidity: f64,
    pub snowfall_cm: f64,
    pub temperature_defaulted: bool,
    pub humidity_defaulted: bool,
}

impl DayReading {
    pub fn resolve(day: &DailySummary, t: &Thresholds) -> Self {
        let max_c = day.max_temp_c.unwrap_or(t.default_max_c);
        // A lone maximum below the default minimum would invert the day.
        let min_c = day.min_temp_c.unwrap_or(t.default_min_c.min(max_c));
        let humidity = day.humidity.unwrap_or(t.default_humidity);
        let avg = (min_c + max_c) / 2.0;
        let snowfall_cm = day
            .snowfall_cm
            .or_else(|| {
                estimate_snowfall_cm(day.precipitation_mm, day.precipitation_kind, avg, t)
            })
            .unwrap_or(0.0)
            .max(0.0);

        Self {
            min_c,
            max_c,
            humidity,
            snowfall_cm,
            temperature_defaulted: day.min_temp_c.is_none() || day.max_temp_c.is_none(),
            humidity_defaulted: day.humidity.is_none(),
        }
    }

    pub fn avg_c(&self) -> f64 {
        (self.min_c + self.max_c) / 2.0
    }

    /// Liquid water was present at some point of the day.
    pub fn is_wet(&self, t: &Thresholds) -> bool {
        self.max_c >= t.wet_c
    }

    /// Stayed dry and averaged below 0 °C.
    pub fn is_freezing(&self, t: &Thresholds) -> bool {
        !self.is_wet(t) && self.avg_c() < 0.0
    }

    /// Close enough to 0 °C for the surface to be moist.
    pub fn is_moist(&self, t: &Thresholds) -> bool {
        self.max_c >= t.moist_c
    }

    pub fn significant_snow(&self, t: &Thresholds) -> bool {
        self.snowfall_cm >= t.significant_snow_cm
    }
}
