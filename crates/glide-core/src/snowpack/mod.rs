//! Snowpack tracker and the per-day inputs it folds.
//!
//! The fold over history is inherently sequential. [`snowpack_boundaries`]
//! runs it once and records the state at each day boundary so per-day
//! classification can then proceed independently.

pub mod estimation;
pub mod reading;
pub mod state;

use crate::config::Thresholds;
use crate::model::weather::DailySummary;

use reading::DayReading;
use state::SnowpackState;

/// Indices of `days` sorted oldest-first. Stable for equal dates, so an
/// already chronological slice maps to `0..n`.
pub fn chronological_order(days: &[DailySummary]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..days.len()).collect();
    order.sort_by_key(|&i| days[i].date);
    order
}

/// Tracker state *before* each day of an oldest-first slice.
///
/// `result[i]` is the state `days[i]` must be classified against.
pub fn snowpack_boundaries(days: &[DailySummary], t: &Thresholds) -> Vec<SnowpackState> {
    days.iter()
        .scan(SnowpackState::new(t), |state, day| {
            let before = *state;
            state.advance(&DayReading::resolve(day, t), t);
            Some(before)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, max_c: f64, snow_cm: f64) -> DailySummary {
        DailySummary::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .with_temps(max_c - 5.0, max_c)
            .with_snowfall(snow_cm)
    }

    #[test]
    fn order_sorts_newest_first_input() {
        let days = vec![day(3, -5.0, 0.0), day(2, -5.0, 0.0), day(1, -5.0, 0.0)];
        assert_eq!(chronological_order(&days), vec![2, 1, 0]);
    }

    #[test]
    fn boundaries_start_fresh_and_lag_one_day() {
        let t = Thresholds::default();
        let days = vec![day(1, -5.0, 5.0), day(2, 3.0, 0.0), day(3, -5.0, 0.0)];
        let b = snowpack_boundaries(&days, &t);
        assert_eq!(b.len(), 3);
        assert_eq!(b[0], SnowpackState::new(&t));
        assert_eq!(b[1].days_since_significant_snow, 0);
        assert_eq!(b[2].days_since_last_melt, Some(0));
    }

    #[test]
    fn empty_history_has_no_boundaries() {
        assert!(snowpack_boundaries(&[], &Thresholds::default()).is_empty());
    }
}
