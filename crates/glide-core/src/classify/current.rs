//! "Right now" classification from the near-term forecast.
//!
//! Snow age is recomputed from the raw daily history in calendar days
//! relative to the first forecast hour, never taken from a tracker mid-run,
//! so the verdict can be audited from the inputs alone.
//!
//! Decision order (first match wins):
//!   1. Snow imminent in the window      → (moist) new-fallen.
//!   2. Wet now or forecast              → wet / very-wet corn.
//!   3. Significant snow yesterday       → (moist) new-fallen.
//!   4. Light snow yesterday             → (moist) fine-grained.
//!   5. Significant snow within N days   → (moist) fine-grained.
//!   6. Recent melt, no cover, freezing  → frozen corn.
//!   7. Humid and near zero              → moist fine-grained.
//!   8. Dry aging by actual day count.

use chrono::NaiveDate;

use crate::config::Thresholds;
use crate::model::assessment::{
    Confidence, Reason, ReasonCode, SnowSurfaceAssessment, SurfaceMetrics,
};
use crate::model::snow_type::SnowType;
use crate::model::weather::{DailySummary, HourlyEntry};
use crate::snowpack::reading::DayReading;

use super::{dry_aging, fine_grained_type, new_snow_type, wet_type, Verdict};

/// What the next few forecast hours say.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOutlook {
    pub now_c: f64,
    pub min_c: f64,
    pub max_c: f64,
    pub avg_c: f64,
    pub hours_above_freezing: u32,
    pub hours_very_wet: u32,
    pub hours_below_cold: u32,
    /// Highest snow probability among snow-bearing hours, if any is imminent.
    pub snow_probability: Option<f64>,
    pub heavy_snow: bool,
    pub humidity: Option<f64>,
}

impl ForecastOutlook {
    /// `None` for an empty forecast.
    pub fn from_hours(hourly: &[HourlyEntry], t: &Thresholds) -> Option<Self> {
        let now = hourly.first()?;
        let window = &hourly[..hourly.len().min(t.forecast_window_hours)];

        let temps = window.iter().map(|h| h.temp_c);
        let min_c = temps.clone().fold(f64::INFINITY, f64::min);
        let max_c = temps.clone().fold(f64::NEG_INFINITY, f64::max);
        let avg_c = temps.sum::<f64>() / window.len() as f64;

        let snow_probability = window
            .iter()
            .filter(|h| h.snow_likely(t.imminent_probability))
            .map(|h| h.precipitation_probability)
            .fold(None, |best: Option<f64>, p| Some(best.map_or(p, |b| b.max(p))));

        Some(Self {
            now_c: now.temp_c,
            min_c,
            max_c,
            avg_c,
            hours_above_freezing: count_hours(window, |h| h.temp_c > 0.0),
            hours_very_wet: count_hours(window, |h| h.temp_c >= t.very_wet_c),
            hours_below_cold: count_hours(window, |h| h.temp_c <= t.cold_hour_c),
            snow_probability,
            heavy_snow: window.iter().any(|h| h.snow_likely(t.heavy_probability)),
            humidity: now.humidity,
        })
    }

    pub fn snow_imminent(&self) -> bool {
        self.snow_probability.is_some()
    }

    pub fn wet_now(&self, t: &Thresholds) -> bool {
        self.now_c >= t.wet_c
    }

    pub fn wet_forecast(&self, t: &Thresholds) -> bool {
        self.wet_now(t) || self.hours_above_freezing >= t.wet_hours
    }

    pub fn very_wet(&self, t: &Thresholds) -> bool {
        self.hours_very_wet >= t.wet_hours
    }

    pub fn moist_now(&self, t: &Thresholds) -> bool {
        self.now_c >= t.moist_c
    }
}

fn count_hours(window: &[HourlyEntry], pred: impl Fn(&HourlyEntry) -> bool) -> u32 {
    window.iter().filter(|&h| pred(h)).count() as u32
}

/// Facts recomputed from the raw daily history relative to `today`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryFacts {
    /// Calendar days since the most recent significant snowfall, if any.
    pub days_since_significant_snow: Option<u32>,
    /// Snowfall of that day.
    pub significant_snow_cm: f64,
    /// Largest single-day snowfall today or yesterday.
    pub last_day_snow_cm: f64,
    /// Calendar days since the most recent wet day, if any.
    pub days_since_melt: Option<u32>,
    /// Snowfall on days strictly after the most recent wet day.
    pub snow_since_melt_cm: f64,
    /// Snowfall over the recent-snow window.
    pub recent_snow_cm: f64,
    /// Humidity of the most recent day that reported one.
    pub humidity: Option<f64>,
    /// Resolved snowfall per day, keyed by age, newest first.
    pub snowfall_by_age: Vec<(u32, f64)>,
}

impl HistoryFacts {
    /// Days dated after `today` are ignored. Order of `history` is irrelevant.
    pub fn from_days(history: &[DailySummary], today: NaiveDate, t: &Thresholds) -> Self {
        let mut aged: Vec<(u32, &DailySummary, DayReading)> = history
            .iter()
            .filter_map(|d| {
                let age = (today - d.date).num_days();
                u32::try_from(age).ok().map(|age| (age, d, DayReading::resolve(d, t)))
            })
            .collect();
        aged.sort_by_key(|(age, _, _)| *age);

        let significant = aged.iter().find(|(_, _, r)| r.significant_snow(t));
        let melt = aged.iter().find(|(_, _, r)| r.is_wet(t));
        let days_since_melt = melt.map(|(age, _, _)| *age);

        let snow_since_melt_cm = match days_since_melt {
            Some(melt_age) => aged
                .iter()
                .filter(|(age, _, _)| *age < melt_age)
                .map(|(_, _, r)| r.snowfall_cm)
                .sum(),
            None => 0.0,
        };

        Self {
            days_since_significant_snow: significant.map(|(age, _, _)| *age),
            significant_snow_cm: significant.map_or(0.0, |(_, _, r)| r.snowfall_cm),
            last_day_snow_cm: aged
                .iter()
                .filter(|(age, _, _)| *age <= 1)
                .map(|(_, _, r)| r.snowfall_cm)
                .fold(0.0, f64::max),
            days_since_melt,
            snow_since_melt_cm,
            recent_snow_cm: aged
                .iter()
                .filter(|(age, _, _)| *age <= t.recent_snow_days)
                .map(|(_, _, r)| r.snowfall_cm)
                .sum(),
            humidity: aged.iter().find_map(|(_, d, _)| d.humidity),
            snowfall_by_age: aged.iter().map(|(age, _, r)| (*age, r.snowfall_cm)).collect(),
        }
    }

    /// Snowfall on days strictly newer than `melt_age`.
    pub fn snow_since(&self, melt_age: u32) -> f64 {
        self.snowfall_by_age
            .iter()
            .filter(|(age, _)| *age < melt_age)
            .map(|(_, cm)| cm)
            .sum()
    }
}

/// Most recent melt known to the current classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MeltEvidence {
    /// Calendar days before today.
    days: Option<u32>,
    /// The age comes from a wet assessment rather than the raw history.
    from_assessment: bool,
}

impl MeltEvidence {
    fn combine(history: Option<u32>, assessed: Option<u32>) -> Self {
        match (history, assessed) {
            (Some(h), Some(a)) if a < h => Self { days: Some(a), from_assessment: true },
            (None, Some(a)) => Self { days: Some(a), from_assessment: true },
            (h, _) => Self { days: h, from_assessment: false },
        }
    }
}

/// Classify the surface now with default thresholds.
pub fn classify_current(
    hourly: &[HourlyEntry],
    history: &[DailySummary],
    yesterday: Option<&SnowSurfaceAssessment>,
) -> Option<SnowSurfaceAssessment> {
    classify_current_with(hourly, history, yesterday, &Thresholds::default())
}

/// Classify the surface at the first forecast hour.
///
/// `yesterday` is the historical assessment of the previous day, used as a
/// humidity fallback. When wet it counts as a melt dated by its timestamp, so
/// an assessment older than `melt_relevance_days` cannot cause a refreeze. Returns `None` only when
/// `hourly` is empty.
pub fn classify_current_with(
    hourly: &[HourlyEntry],
    history: &[DailySummary],
    yesterday: Option<&SnowSurfaceAssessment>,
    t: &Thresholds,
) -> Option<SnowSurfaceAssessment> {
    let outlook = ForecastOutlook::from_hours(hourly, t)?;
    let now = hourly.first()?.timestamp;
    let facts = HistoryFacts::from_days(history, now.date_naive(), t);

    let humidity = outlook
        .humidity
        .or(facts.humidity)
        .or_else(|| yesterday.and_then(|y| y.metrics.humidity));
    let humidity_defaulted = humidity.is_none();
    if humidity_defaulted {
        tracing::warn!(default = t.default_humidity, "no humidity in forecast or history, using default");
    }
    let humidity = humidity.unwrap_or(t.default_humidity);

    let today = now.date_naive();
    let assessed_melt = yesterday
        .filter(|y| y.snow_type.is_wet())
        .and_then(|y| u32::try_from((today - y.timestamp.date_naive()).num_days()).ok());
    let melt = MeltEvidence::combine(facts.days_since_melt, assessed_melt);
    let mut verdict = decide(&outlook, &facts, humidity, melt, t);
    if humidity_defaulted {
        verdict.reasons.push(Reason::new(ReasonCode::MissingHumidity));
    }

    tracing::debug!(
        at = %now,
        snow_type = %verdict.snow_type,
        rule = verdict.rule,
        "classified current conditions"
    );

    let days_since_significant_snow = facts
        .days_since_significant_snow
        .unwrap_or(t.unknown_snow_age_days);

    Some(SnowSurfaceAssessment {
        timestamp: now,
        snow_type: verdict.snow_type,
        confidence: verdict.confidence,
        reasons: verdict.reasons,
        metrics: SurfaceMetrics {
            recent_snow_cm: facts.recent_snow_cm,
            min_temp_c: Some(outlook.min_c),
            max_temp_c: Some(outlook.max_c),
            hours_above_freezing: Some(outlook.hours_above_freezing),
            hours_below_cold: Some(outlook.hours_below_cold),
            refreeze_detected: verdict.snow_type == SnowType::FrozenCorn,
            days_since_melt: melt.days,
            days_since_significant_snow: Some(days_since_significant_snow),
            humidity: Some(humidity),
        },
    })
}

fn decide(
    outlook: &ForecastOutlook,
    facts: &HistoryFacts,
    humidity: f64,
    melt: MeltEvidence,
    t: &Thresholds,
) -> Verdict {
    let moist = outlook.moist_now(t);

    // 1. Snow on the way.
    if let Some(probability) = outlook.snow_probability {
        let (code, confidence) = if outlook.heavy_snow {
            (ReasonCode::HeavySnowImminent, Confidence::High)
        } else {
            (ReasonCode::SnowImminent, Confidence::Medium)
        };
        return Verdict::new("forecast_snow", new_snow_type(moist), confidence)
            .because(Reason::new(code).with_fraction("probability", probability));
    }

    // 2. Wet now or within the window.
    if outlook.wet_forecast(t) {
        let very_wet = outlook.very_wet(t);
        let confidence = if outlook.wet_now(t) { Confidence::High } else { Confidence::Medium };
        let mut v = Verdict::new("forecast_wet", wet_type(very_wet), confidence);
        if outlook.wet_now(t) {
            v = v.because(Reason::new(ReasonCode::WetNow).with_measure("temperature", outlook.now_c));
        }
        v = v.because(Reason::new(ReasonCode::WarmHours).with_count("hours", outlook.hours_above_freezing));
        if very_wet {
            v = v.because(Reason::new(ReasonCode::SustainedWarmth).with_count("hours", outlook.hours_very_wet));
        }
        return v;
    }

    // 3. Significant snow yesterday (or earlier today).
    if let Some(days) = facts.days_since_significant_snow.filter(|&d| d <= 1) {
        return Verdict::new("snow_yesterday", new_snow_type(moist), Confidence::High).because(
            Reason::new(ReasonCode::SnowYesterday)
                .with_measure("snow_cm", facts.significant_snow_cm)
                .with_count("days", days),
        );
    }

    // 4. Only a light dusting yesterday.
    if facts.last_day_snow_cm > t.light_snow_cm {
        return Verdict::new("light_snow_yesterday", fine_grained_type(moist), Confidence::Medium)
            .because(Reason::new(ReasonCode::LightSnowYesterday).with_measure("snow_cm", facts.last_day_snow_cm));
    }

    // 5. Snowed within the recent window.
    if let Some(days) = facts
        .days_since_significant_snow
        .filter(|&d| d <= t.recent_snow_days)
    {
        let cold = outlook.avg_c <= t.markedly_cold_avg_c;
        let confidence = if cold { Confidence::High } else { Confidence::Medium };
        return Verdict::new("recent_snow", fine_grained_type(moist && !cold), confidence)
            .because(Reason::new(ReasonCode::RecentSnow).with_count("days", days));
    }

    // 6. Refrozen melt crust.
    if let Some(melt_age) = melt.days.filter(|&d| d <= t.melt_relevance_days) {
        let snow_since_melt_cm = facts.snow_since(melt_age);
        if snow_since_melt_cm < t.significant_snow_cm && outlook.now_c < 0.0 {
            let mut v = Verdict::new("refrozen", SnowType::FrozenCorn, Confidence::High)
                .because(Reason::new(ReasonCode::RefrozenAfterMelt).with_count("days", melt_age));
            if melt.from_assessment {
                v = v.because(Reason::new(ReasonCode::WetYesterday));
            }
            return v
                .because(Reason::new(ReasonCode::NoNewCover).with_measure("snow_cm", snow_since_melt_cm))
                .because(Reason::new(ReasonCode::FreezingNow).with_measure("temperature", outlook.now_c));
        }
    }

    // 7. Humid, hovering near zero.
    if moist && outlook.now_c < t.wet_c && humidity >= t.humid {
        return Verdict::new("humid_moist", SnowType::MoistFineGrained, Confidence::Medium).because(
            Reason::new(ReasonCode::HumidNearZero)
                .with_measure("max_temp", outlook.now_c)
                .with_fraction("humidity", humidity),
        );
    }

    // 8. Dry aging on actual calendar days.
    let days = facts
        .days_since_significant_snow
        .unwrap_or(t.unknown_snow_age_days);
    let mut v = dry_aging(days, outlook.avg_c, outlook.max_c, t);
    if facts.days_since_significant_snow.is_none() {
        v = v.because(Reason::new(ReasonCode::NoSnowInWindow).with_count("days", days));
    }
    v
}
