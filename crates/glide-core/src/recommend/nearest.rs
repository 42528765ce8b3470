use crate::model::snow_type::SnowType;

use super::candidate::Candidate;

/// Closest temperature to `t` at which some candidate has a range for
/// `snow_type`. `None` when no candidate defines one.
///
/// When `t` already lies inside a range the answer is `t` itself.
pub fn nearest_temperature(candidates: &[Candidate], t: f64, snow_type: SnowType) -> Option<f64> {
    candidates
        .iter()
        .flat_map(|c| c.ranges_for(snow_type))
        .map(|r| r.clamp(t))
        .min_by(|a, b| (a - t).abs().total_cmp(&(b - t).abs()))
}
