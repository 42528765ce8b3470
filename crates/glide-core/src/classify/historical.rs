//! Per-day classification over the observed history.
//!
//! Decision order (first match wins):
//!   1. Wet: max ≥ wet threshold → wet / very-wet corn.
//!   2. New snow: effective snowfall ≥ significant → (moist) new-fallen.
//!   3. Refrozen: recent uncovered melt, freezing day → frozen corn.
//!   4. Humid moist: max in [moist, 0), humid, not very cold → transformed.
//!   5. Dry aging: light leftover snowfall, then days since snow.

use crate::config::Thresholds;
use crate::model::assessment::{
    start_of_day, Confidence, Reason, ReasonCode, SnowSurfaceAssessment, SurfaceMetrics,
};
use crate::model::snow_type::SnowType;
use crate::model::weather::DailySummary;
use crate::snowpack::reading::DayReading;
use crate::snowpack::state::SnowpackState;
use crate::snowpack::chronological_order;

use super::{dry_aging, fine_grained_type, new_snow_type, wet_type, Verdict};

/// Classify one day against the tracker state from before that day.
///
/// The caller advances the tracker afterwards
/// (see [`SnowpackState::advance`]).
pub fn classify_day(day: &DailySummary, state: &SnowpackState) -> SnowSurfaceAssessment {
    classify_day_with(day, state, &Thresholds::default())
}

pub fn classify_day_with(
    day: &DailySummary,
    state: &SnowpackState,
    t: &Thresholds,
) -> SnowSurfaceAssessment {
    let reading = DayReading::resolve(day, t);
    let mut verdict = decide(&reading, state, t);

    if reading.temperature_defaulted {
        verdict.reasons.push(Reason::new(ReasonCode::MissingTemperature));
    }
    if reading.humidity_defaulted {
        verdict.reasons.push(Reason::new(ReasonCode::MissingHumidity));
    }

    tracing::debug!(
        date = %day.date,
        snow_type = %verdict.snow_type,
        rule = verdict.rule,
        "classified day"
    );

    SnowSurfaceAssessment {
        timestamp: start_of_day(day.date),
        snow_type: verdict.snow_type,
        confidence: verdict.confidence,
        reasons: verdict.reasons,
        metrics: SurfaceMetrics {
            recent_snow_cm: reading.snowfall_cm,
            min_temp_c: day.min_temp_c,
            max_temp_c: day.max_temp_c,
            hours_above_freezing: None,
            hours_below_cold: None,
            refreeze_detected: verdict.snow_type == SnowType::FrozenCorn,
            days_since_melt: state.days_since_last_melt,
            days_since_significant_snow: Some(state.days_since_significant_snow),
            humidity: day.humidity,
        },
    }
}

fn decide(day: &DayReading, state: &SnowpackState, t: &Thresholds) -> Verdict {
    // 1. Wetness dominates everything else.
    if day.is_wet(t) {
        let very_wet = day.max_c >= t.very_wet_c;
        let code = if very_wet { ReasonCode::VeryWet } else { ReasonCode::WetAboveThreshold };
        return Verdict::new("wet", wet_type(very_wet), Confidence::High)
            .because(Reason::new(code).with_measure("max_temp", day.max_c));
    }

    // 2. Fresh snow resets the surface.
    if day.significant_snow(t) {
        let moist = day.is_moist(t);
        let v = Verdict::new("new_snow", new_snow_type(moist), Confidence::High)
            .because(Reason::new(ReasonCode::SignificantSnowfall).with_measure("snow_cm", day.snowfall_cm));
        return if moist {
            v.because(Reason::new(ReasonCode::MoistNewSnow).with_measure("max_temp", day.max_c))
        } else {
            v
        };
    }

    // 3. Recent melt, no cover since, freezing now.
    if state.is_refrozen(day, t) {
        let days = state.days_since_last_melt.unwrap_or_default();
        return Verdict::new("refrozen", SnowType::FrozenCorn, Confidence::High)
            .because(Reason::new(ReasonCode::RefrozenAfterMelt).with_count("days", days))
            .because(
                Reason::new(ReasonCode::NoNewCover)
                    .with_measure("snow_cm", state.snow_depth_since_last_melt),
            );
    }

    // 4. Humid and just below zero.
    if day.max_c >= t.moist_c
        && day.max_c < 0.0
        && day.humidity >= t.humid
        && day.avg_c() > t.very_cold_avg_c
    {
        return Verdict::new("humid_moist", SnowType::TransformedMoistFine, Confidence::Medium).because(
            Reason::new(ReasonCode::HumidNearZero)
                .with_measure("max_temp", day.max_c)
                .with_fraction("humidity", day.humidity),
        );
    }

    // 5. Dry aging. A light dusting keeps the surface fine-grained.
    if day.snowfall_cm > t.light_snow_cm {
        let moist = day.is_moist(t);
        return Verdict::new("light_snow", fine_grained_type(moist), Confidence::Medium)
            .because(Reason::new(ReasonCode::LightSnowfall).with_measure("snow_cm", day.snowfall_cm));
    }

    dry_aging(state.days_since_significant_snow, day.avg_c(), day.max_c, t)
}

/// Classify a whole history with default thresholds.
///
/// See [`classify_history_with`].
pub fn classify_history(days: &[DailySummary]) -> Vec<SnowSurfaceAssessment> {
    classify_history_with(days, &Thresholds::default())
}

/// Classify every day of `days`, which may be in either order.
///
/// Days are folded oldest-first through a fresh tracker; the returned
/// assessments line up index-for-index with the input.
pub fn classify_history_with(days: &[DailySummary], t: &Thresholds) -> Vec<SnowSurfaceAssessment> {
    let order = chronological_order(days);
    let mut state = SnowpackState::new(t);
    let mut slots: Vec<Option<SnowSurfaceAssessment>> = vec![None; days.len()];

    for &i in &order {
        let day = &days[i];
        slots[i] = Some(classify_day_with(day, &state, t));
        state.advance(&DayReading::resolve(day, t), t);
    }

    slots.into_iter().flatten().collect()
}

#[cfg(feature = "threading")]
pub fn classify_history_parallel(days: &[DailySummary]) -> Vec<SnowSurfaceAssessment> {
    classify_history_parallel_with(days, &Thresholds::default())
}

/// Parallel form of [`classify_history_with`].
///
/// The tracker fold runs once up front; each day is then classified against
/// its boundary state on the rayon pool. Output is identical to the
/// sequential path.
#[cfg(feature = "threading")]
pub fn classify_history_parallel_with(
    days: &[DailySummary],
    t: &Thresholds,
) -> Vec<SnowSurfaceAssessment> {
    use crate::snowpack::snowpack_boundaries;
    use rayon::prelude::*;

    let order = chronological_order(days);
    let sorted: Vec<DailySummary> = order.iter().map(|&i| days[i].clone()).collect();
    let boundaries = snowpack_boundaries(&sorted, t);

    let classified: Vec<SnowSurfaceAssessment> = sorted
        .par_iter()
        .zip(boundaries.par_iter())
        .map(|(day, state)| classify_day_with(day, state, t))
        .collect();

    let mut slots: Vec<Option<SnowSurfaceAssessment>> = vec![None; days.len()];
    for (assessment, &i) in classified.into_iter().zip(order.iter()) {
        slots[i] = Some(assessment);
    }
    slots.into_iter().flatten().collect()
}

/// Sequential classification from precomputed boundary states.
///
/// `days` must be oldest-first and `boundaries` must come from
/// [`snowpack_boundaries`](crate::snowpack::snowpack_boundaries) over the
/// same slice.
pub fn classify_from_boundaries(
    days: &[DailySummary],
    boundaries: &[SnowpackState],
    t: &Thresholds,
) -> Vec<SnowSurfaceAssessment> {
    days.iter()
        .zip(boundaries)
        .map(|(day, state)| classify_day_with(day, state, t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::weather::PrecipitationKind;
    use crate::snowpack::snowpack_boundaries;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn dry(d: u32, min_c: f64, max_c: f64) -> DailySummary {
        DailySummary::new(date(d))
            .with_temps(min_c, max_c)
            .with_snowfall(0.0)
            .with_humidity(0.6)
    }

    #[test]
    fn wet_day_is_wet_corn() {
        let t = Thresholds::default();
        let s = SnowpackState::new(&t);
        let a = classify_day(&dry(1, -2.0, 1.0), &s);
        assert_eq!(a.snow_type, SnowType::WetCorn);
        assert_eq!(a.confidence, Confidence::High);
        let b = classify_day(&dry(1, -2.0, 2.0), &s);
        assert_eq!(b.snow_type, SnowType::VeryWetCorn);
    }

    #[test]
    fn wetness_beats_heavy_snowfall() {
        let t = Thresholds::default();
        let day = dry(1, -1.0, 0.6).with_snowfall(15.0);
        assert_eq!(classify_day(&day, &SnowpackState::new(&t)).snow_type, SnowType::WetCorn);
    }

    #[test]
    fn significant_snow_is_new_fallen() {
        let t = Thresholds::default();
        let s = SnowpackState::new(&t);
        let cold = dry(1, -10.0, -4.0).with_snowfall(5.0);
        assert_eq!(classify_day(&cold, &s).snow_type, SnowType::NewFallen);
        let mild = dry(1, -4.0, -0.5).with_snowfall(5.0);
        let a = classify_day(&mild, &s);
        assert_eq!(a.snow_type, SnowType::MoistNewFallen);
        assert_eq!(a.reason(ReasonCode::SignificantSnowfall).unwrap().param("snow_cm"), Some("5.0"));
    }

    #[test]
    fn estimated_snowfall_counts_when_unmeasured() {
        let t = Thresholds::default();
        let day = DailySummary::new(date(1))
            .with_temps(-12.0, -8.0)
            .with_precipitation(3.0, PrecipitationKind::Snow);
        // avg −10 °C → ratio 15 → 4.5 cm.
        let a = classify_day(&day, &SnowpackState::new(&t));
        assert_eq!(a.snow_type, SnowType::NewFallen);
        assert!((a.metrics.recent_snow_cm - 4.5).abs() < 1e-9);
    }

    #[test]
    fn humid_near_zero_is_transformed() {
        let t = Thresholds::default();
        let day = dry(1, -4.0, -0.5).with_humidity(0.9);
        let a = classify_day(&day, &SnowpackState::new(&t));
        assert_eq!(a.snow_type, SnowType::TransformedMoistFine);
        assert_eq!(a.confidence, Confidence::Medium);
    }

    #[test]
    fn humid_but_very_cold_falls_through_to_aging() {
        let t = Thresholds::default();
        let day = dry(1, -24.0, -0.5).with_humidity(0.9);
        let a = classify_day(&day, &SnowpackState::new(&t));
        assert_eq!(a.snow_type, SnowType::FineGrained);
        assert_eq!(a.confidence, Confidence::High);
        assert!(!a.has_reason(ReasonCode::HumidNearZero));
        assert!(a.has_reason(ReasonCode::ColdDry));
    }

    #[test]
    fn light_snowfall_keeps_fine_grained() {
        let t = Thresholds::default();
        let mut s = SnowpackState::new(&t);
        s.days_since_significant_snow = 8;
        let a = classify_day(&dry(1, -9.0, -4.0).with_snowfall(1.2), &s);
        assert_eq!(a.snow_type, SnowType::FineGrained);
        assert!(a.has_reason(ReasonCode::LightSnowfall));
    }

    #[test]
    fn missing_readings_are_flagged() {
        let t = Thresholds::default();
        let a = classify_day(&DailySummary::new(date(1)), &SnowpackState::new(&t));
        assert!(a.has_reason(ReasonCode::MissingTemperature));
        assert!(a.has_reason(ReasonCode::MissingHumidity));
        assert_eq!(a.metrics.max_temp_c, None);
    }

    #[test]
    fn melt_then_freeze_sequence() {
        let days = vec![dry(1, -1.0, 5.0), dry(2, -12.0, -6.0), dry(3, -12.0, -6.0)];
        let out = classify_history(&days);
        let types: Vec<SnowType> = out.iter().map(|a| a.snow_type).collect();
        assert_eq!(types, vec![SnowType::VeryWetCorn, SnowType::FrozenCorn, SnowType::FrozenCorn]);
        assert!(out[1].metrics.refreeze_detected);
        assert_eq!(out[2].metrics.days_since_melt, Some(1));
    }

    #[test]
    fn newest_first_input_keeps_input_order() {
        let oldest_first = vec![dry(1, -1.0, 5.0), dry(2, -12.0, -6.0), dry(3, -12.0, -6.0)];
        let newest_first: Vec<DailySummary> = oldest_first.iter().rev().cloned().collect();
        let a = classify_history(&oldest_first);
        let b = classify_history(&newest_first);
        let reversed: Vec<SnowSurfaceAssessment> = b.into_iter().rev().collect();
        assert_eq!(a, reversed);
    }

    #[test]
    fn boundaries_reproduce_sequential_run() {
        let t = Thresholds::default();
        let days: Vec<DailySummary> = (1..=8)
            .map(|d| dry(d, -9.0, if d == 3 { 4.0 } else { -3.0 }).with_snowfall(if d == 5 { 3.0 } else { 0.0 }))
            .collect();
        let boundaries = snowpack_boundaries(&days, &t);
        assert_eq!(classify_from_boundaries(&days, &boundaries, &t), classify_history_with(&days, &t));
    }

    #[cfg(feature = "threading")]
    #[test]
    fn parallel_matches_sequential() {
        let t = Thresholds::default();
        let days: Vec<DailySummary> = (1..=10)
            .rev()
            .map(|d| dry(d, -8.0, if d % 4 == 0 { 3.0 } else { -2.0 }).with_snowfall((d % 3) as f64))
            .collect();
        assert_eq!(classify_history_parallel_with(&days, &t), classify_history_with(&days, &t));
    }
}
