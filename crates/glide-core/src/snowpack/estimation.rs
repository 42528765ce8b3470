//! Snowfall estimation from precipitation when no depth was measured.
//!
//! Cold snow is less dense, so the same water equivalent yields more depth:
//! the snow:water ratio rises linearly from `snow_ratio_warm` at 0 °C to
//! `snow_ratio_cold` at `snow_ratio_cold_c` and stays flat beyond either end.

use crate::config::Thresholds;
use crate::model::weather::PrecipitationKind;

/// Snow:water depth ratio at `temp_c`.
pub fn snow_ratio(temp_c: f64, t: &Thresholds) -> f64 {
    let coldness = (temp_c / t.snow_ratio_cold_c).clamp(0.0, 1.0);
    t.snow_ratio_warm + coldness * (t.snow_ratio_cold - t.snow_ratio_warm)
}

/// Estimated snow depth in cm from `precip_mm` of the given kind.
///
/// `None` whenever the kind does not carry snow or either input is unknown,
/// so callers can tell "no snow" from "can't say".
pub fn estimate_snowfall_cm(
    precip_mm: Option<f64>,
    kind: Option<PrecipitationKind>,
    temp_c: f64,
    t: &Thresholds,
) -> Option<f64> {
    let mm = precip_mm?;
    let share = match kind? {
        PrecipitationKind::Snow => 1.0,
        PrecipitationKind::Mixed => 0.5,
        PrecipitationKind::None
        | PrecipitationKind::Rain
        | PrecipitationKind::Sleet
        | PrecipitationKind::Hail => return None,
    };
    // mm of water × ratio = mm of snow; /10 for cm.
    Some(mm.max(0.0) * share * snow_ratio(temp_c, t) / 10.0)
}
