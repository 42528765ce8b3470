//! Cross-day snowpack memory.
//!
//! A single day's numbers cannot tell old dry snow from a surface that was wet
//! two days ago and has since refrozen. The tracker carries that memory
//! through one oldest-first pass over the history and is dropped afterwards.

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;

use super::reading::DayReading;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnowpackState {
    pub days_since_significant_snow: u32,
    /// `None` when no melt is being tracked.
    pub days_since_last_melt: Option<u32>,
    /// cm of snow that fell after the tracked melt (or since the run began).
    pub snow_depth_since_last_melt: f64,
    pub was_wet_recently: bool,
}

impl SnowpackState {
    /// Fresh tracker for a run with no knowledge before its first day.
    ///
    /// The snow age starts at `unknown_snow_age_days` so the first days of a
    /// window are neither treated as freshly snowed on nor as long aged.
    pub fn new(t: &Thresholds) -> Self {
        Self {
            days_since_significant_snow: t.unknown_snow_age_days,
            days_since_last_melt: None,
            snow_depth_since_last_melt: 0.0,
            was_wet_recently: false,
        }
    }

    /// Fold one already-classified day into the tracker.
    pub fn advance(&mut self, day: &DayReading, t: &Thresholds) {
        if day.significant_snow(t) {
            self.days_since_significant_snow = 0;
        } else {
            self.days_since_significant_snow = self.days_since_significant_snow.saturating_add(1);
        }
        if day.snowfall_cm > 0.0 {
            self.snow_depth_since_last_melt += day.snowfall_cm;
        }

        if day.is_wet(t) {
            self.days_since_last_melt = Some(0);
            self.snow_depth_since_last_melt = 0.0;
            self.was_wet_recently = true;
        } else if let Some(days) = self.days_since_last_melt {
            let days = days + 1;
            if days > t.melt_relevance_days {
                self.days_since_last_melt = None;
                self.was_wet_recently = false;
            } else {
                self.days_since_last_melt = Some(days);
            }
        }

        tracing::trace!(
            days_since_snow = self.days_since_significant_snow,
            days_since_melt = ?self.days_since_last_melt,
            depth_since_melt = self.snow_depth_since_last_melt,
            "snowpack advanced"
        );
    }

    /// Same as [`advance`](Self::advance) but returns the new state.
    pub fn advanced(mut self, day: &DayReading, t: &Thresholds) -> Self {
        self.advance(day, t);
        self
    }

    /// A tracked, still-relevant melt with no fresh cover since.
    pub fn melt_uncovered(&self, t: &Thresholds) -> bool {
        self.days_since_last_melt
            .is_some_and(|d| d <= t.melt_relevance_days)
            && self.snow_depth_since_last_melt < t.significant_snow_cm
    }

    /// The surface is a refrozen melt crust on a day like `day`.
    pub fn is_refrozen(&self, day: &DayReading, t: &Thresholds) -> bool {
        self.melt_uncovered(t) && day.is_freezing(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(max_c: f64, snow_cm: f64) -> DayReading {
        DayReading {
            min_c: max_c - 6.0,
            max_c,
            humidity: 0.6,
            snowfall_cm: snow_cm,
            temperature_defaulted: false,
            humidity_defaulted: false,
        }
    }

    #[test]
    fn significant_snow_resets_age() {
        let t = Thresholds::default();
        let mut s = SnowpackState::new(&t);
        s.advance(&reading(-5.0, 0.0), &t);
        assert_eq!(s.days_since_significant_snow, 4);
        s.advance(&reading(-5.0, 3.0), &t);
        assert_eq!(s.days_since_significant_snow, 0);
        assert_eq!(s.snow_depth_since_last_melt, 3.0);
    }

    #[test]
    fn light_snow_ages_but_accumulates_depth() {
        let t = Thresholds::default();
        let mut s = SnowpackState::new(&t);
        s.advance(&reading(-5.0, 1.0), &t);
        s.advance(&reading(-5.0, 0.5), &t);
        assert_eq!(s.days_since_significant_snow, 5);
        assert!((s.snow_depth_since_last_melt - 1.5).abs() < 1e-9);
    }

    #[test]
    fn melt_resets_depth_and_starts_window() {
        let t = Thresholds::default();
        let mut s = SnowpackState::new(&t);
        s.advance(&reading(-5.0, 4.0), &t);
        s.advance(&reading(3.0, 0.0), &t);
        assert_eq!(s.days_since_last_melt, Some(0));
        assert_eq!(s.snow_depth_since_last_melt, 0.0);
        assert!(s.was_wet_recently);
    }

    #[test]
    fn melt_expires_after_relevance_window() {
        let t = Thresholds::default();
        let mut s = SnowpackState::new(&t).advanced(&reading(3.0, 0.0), &t);
        for expected in 1..=3 {
            s.advance(&reading(-5.0, 0.0), &t);
            assert_eq!(s.days_since_last_melt, Some(expected));
            assert!(s.was_wet_recently);
        }
        s.advance(&reading(-5.0, 0.0), &t);
        assert_eq!(s.days_since_last_melt, None);
        assert!(!s.was_wet_recently);
    }

    #[test]
    fn refrozen_needs_freezing_day_and_no_cover() {
        let t = Thresholds::default();
        let s = SnowpackState::new(&t).advanced(&reading(3.0, 0.0), &t);
        assert!(s.is_refrozen(&reading(-5.0, 0.0), &t));
        let mild = DayReading { min_c: 0.0, max_c: 0.4, ..reading(0.4, 0.0) };
        assert!(!s.is_refrozen(&mild, &t));

        let covered = s.advanced(&reading(-5.0, 2.5), &t);
        assert!(!covered.is_refrozen(&reading(-5.0, 0.0), &t));
    }

    #[test]
    fn fresh_tracker_is_not_refrozen() {
        let t = Thresholds::default();
        assert!(!SnowpackState::new(&t).is_refrozen(&reading(-8.0, 0.0), &t));
    }
}
