//! Product recommendation for a snow type and air temperature.
//!
//! A candidate matches when one of its ranges for the snow type contains the
//! temperature. Matches are scored by how centred the temperature sits in the
//! range. When nothing matches, [`nearest_temperature`] tells the caller how
//! far off the closest coverage is.

pub mod candidate;
pub mod matcher;
pub mod nearest;

use serde::Serialize;

use crate::model::assessment::SnowSurfaceAssessment;
use crate::model::snow_type::SnowType;

pub use candidate::Candidate;
pub use matcher::{best_match, match_score, recommend, Recommendation, SCORE_TIE_EPSILON};
pub use nearest::nearest_temperature;

/// [`recommend`] for the snow type of an assessment.
pub fn recommend_for<'a>(
    candidates: &'a [Candidate],
    t: f64,
    assessment: &SnowSurfaceAssessment,
) -> Vec<Recommendation<'a>> {
    recommend(candidates, t, assessment.snow_type)
}

/// Outcome of a lookup that falls back to the nearest covered temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Lookup<'a> {
    Matches { recommendations: Vec<Recommendation<'a>> },
    Nearest { temperature: f64 },
    Uncovered,
}

/// Ranked matches, or the nearest covered temperature when there are none.
pub fn recommend_or_nearest(candidates: &[Candidate], t: f64, snow_type: SnowType) -> Lookup<'_> {
    let recommendations = recommend(candidates, t, snow_type);
    if !recommendations.is_empty() {
        return Lookup::Matches { recommendations };
    }
    match nearest_temperature(candidates, t, snow_type) {
        Some(temperature) => Lookup::Nearest { temperature },
        None => Lookup::Uncovered,
    }
}
