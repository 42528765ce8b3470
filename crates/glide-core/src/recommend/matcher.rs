//! Range containment, centredness score and ranking.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::range::TemperatureRange;
use crate::model::snow_type::SnowType;

use super::candidate::Candidate;

/// Scores closer than this are ranked as equal and fall back to range width.
pub const SCORE_TIE_EPSILON: f64 = 0.01;

/// A candidate whose range for the queried snow type contains the temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub candidate: &'a Candidate,
    /// 1.0 at the centre of `range`, 0.0 at its bounds.
    pub score: f64,
    /// The range that produced `score`.
    pub range: TemperatureRange,
}

/// Centredness of `t` within `range`, or `None` when `t` falls outside it.
pub fn match_score(range: &TemperatureRange, t: f64) -> Option<f64> {
    if !range.contains(t) {
        return None;
    }
    let half = range.half_width();
    if half == 0.0 {
        return Some(1.0);
    }
    Some((1.0 - (t - range.center()).abs() / half).clamp(0.0, 1.0))
}

/// Best-scoring containing range of one candidate. Equal scores prefer the
/// narrower range.
pub fn best_match(candidate: &Candidate, snow_type: SnowType, t: f64) -> Option<Recommendation<'_>> {
    candidate
        .ranges_for(snow_type)
        .iter()
        .filter_map(|r| match_score(r, t).map(|score| Recommendation { candidate, score, range: *r }))
        .fold(None, |best, next| match best {
            Some(b) if !precedes(&next, &b) => Some(b),
            _ => Some(next),
        })
}

/// Ranked matches for `t` and `snow_type`: descending score, near-ties broken
/// by ascending range width.
pub fn recommend<'a>(candidates: &'a [Candidate], t: f64, snow_type: SnowType) -> Vec<Recommendation<'a>> {
    let mut ranked: Vec<Recommendation<'a>> = Vec::new();
    for rec in candidates.iter().filter_map(|c| best_match(c, snow_type, t)) {
        // Insertion keeps the tolerance-based order well defined even though
        // "within epsilon" is not transitive.
        let at = ranked
            .iter()
            .position(|existing| precedes(&rec, existing))
            .unwrap_or(ranked.len());
        ranked.insert(at, rec);
    }
    tracing::debug!(temperature = t, snow_type = %snow_type, matches = ranked.len(), "ranked candidates");
    ranked
}

/// `a` ranks strictly ahead of `b`.
fn precedes(a: &Recommendation<'_>, b: &Recommendation<'_>) -> bool {
    if (a.score - b.score).abs() <= SCORE_TIE_EPSILON {
        a.range.width() < b.range.width()
    } else {
        a.score.total_cmp(&b.score) == Ordering::Greater
    }
}
