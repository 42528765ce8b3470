//! Rule-ordered snow-surface classifiers.
//!
//! Both classifiers are total over their inputs: missing readings fall back
//! to configured defaults and every path ends in a verdict. Rule order is
//! significant; the first rule that fires decides the surface.
//!
//! Both paths age dry snow on plain calendar-day thresholds:
//!   ≤ 1 day → new-fallen, 2–4 days → fine-grained, ≥ 5 days → old-grained.

pub mod current;
pub mod historical;

use crate::config::Thresholds;
use crate::model::assessment::{Confidence, Reason, ReasonCode};
use crate::model::snow_type::SnowType;

/// Snow type, confidence and reasons before metrics are attached.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Verdict {
    pub snow_type: SnowType,
    pub confidence: Confidence,
    pub reasons: Vec<Reason>,
    /// Short rule label for logs.
    pub rule: &'static str,
}

impl Verdict {
    fn new(rule: &'static str, snow_type: SnowType, confidence: Confidence) -> Self {
        Self { snow_type, confidence, reasons: Vec::new(), rule }
    }

    fn because(mut self, reason: Reason) -> Self {
        self.reasons.push(reason);
        self
    }
}

pub(crate) fn new_snow_type(moist: bool) -> SnowType {
    if moist {
        SnowType::MoistNewFallen
    } else {
        SnowType::NewFallen
    }
}

pub(crate) fn fine_grained_type(moist: bool) -> SnowType {
    if moist {
        SnowType::MoistFineGrained
    } else {
        SnowType::FineGrained
    }
}

pub(crate) fn wet_type(very_wet: bool) -> SnowType {
    if very_wet {
        SnowType::VeryWetCorn
    } else {
        SnowType::WetCorn
    }
}

/// Dry snow aged by `days` since the last significant snowfall.
///
/// `avg_c` decides whether the cold keeps fine grains crisp; `max_c` whether
/// the surface is moist.
pub(crate) fn dry_aging(days: u32, avg_c: f64, max_c: f64, t: &Thresholds) -> Verdict {
    let moist = max_c >= t.moist_c;
    let cold = avg_c <= t.markedly_cold_avg_c;

    match days {
        0..=1 => {
            let v = Verdict::new("aging.new", new_snow_type(moist), Confidence::Medium)
                .because(Reason::new(ReasonCode::RecentSnow).with_count("days", days));
            if moist {
                v.because(Reason::new(ReasonCode::MoistNearZero).with_measure("max_temp", max_c))
            } else {
                v
            }
        }
        2..=4 => {
            let age = Reason::new(ReasonCode::FineGrainedAge).with_count("days", days);
            if cold {
                Verdict::new("aging.fine_cold", SnowType::FineGrained, Confidence::High)
                    .because(age)
                    .because(Reason::new(ReasonCode::ColdDry).with_measure("avg_temp", avg_c))
            } else if moist {
                Verdict::new("aging.fine_moist", SnowType::MoistFineGrained, Confidence::Medium)
                    .because(age)
                    .because(Reason::new(ReasonCode::MoistNearZero).with_measure("max_temp", max_c))
            } else {
                Verdict::new("aging.fine", SnowType::FineGrained, Confidence::Medium).because(age)
            }
        }
        _ => {
            let age = Reason::new(ReasonCode::OldSnow).with_count("days", days);
            if moist {
                Verdict::new("aging.old_moist", SnowType::TransformedMoistFine, Confidence::Medium)
                    .because(age)
                    .because(Reason::new(ReasonCode::MoistNearZero).with_measure("max_temp", max_c))
            } else if cold {
                Verdict::new("aging.old_cold", SnowType::OldGrained, Confidence::High)
                    .because(age)
                    .because(Reason::new(ReasonCode::ColdDry).with_measure("avg_temp", avg_c))
            } else {
                let confidence = if days >= t.long_aged_days {
                    Confidence::High
                } else {
                    Confidence::Medium
                };
                Verdict::new("aging.old", SnowType::OldGrained, confidence).because(age)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aging_thresholds() {
        let t = Thresholds::default();
        assert_eq!(dry_aging(0, -5.0, -3.0, &t).snow_type, SnowType::NewFallen);
        assert_eq!(dry_aging(1, -5.0, -3.0, &t).snow_type, SnowType::NewFallen);
        assert_eq!(dry_aging(2, -5.0, -3.0, &t).snow_type, SnowType::FineGrained);
        assert_eq!(dry_aging(4, -5.0, -3.0, &t).snow_type, SnowType::FineGrained);
        assert_eq!(dry_aging(5, -5.0, -3.0, &t).snow_type, SnowType::OldGrained);
    }

    #[test]
    fn moist_variants_near_zero() {
        let t = Thresholds::default();
        assert_eq!(dry_aging(1, -3.0, -0.5, &t).snow_type, SnowType::MoistNewFallen);
        assert_eq!(dry_aging(3, -3.0, -0.5, &t).snow_type, SnowType::MoistFineGrained);
        assert_eq!(dry_aging(6, -3.0, -0.5, &t).snow_type, SnowType::TransformedMoistFine);
    }

    #[test]
    fn cold_fine_grained_is_confident() {
        let t = Thresholds::default();
        let v = dry_aging(3, -9.0, -5.0, &t);
        assert_eq!(v.snow_type, SnowType::FineGrained);
        assert_eq!(v.confidence, Confidence::High);
        assert!(v.reasons.iter().any(|r| r.code == ReasonCode::ColdDry));
    }

    #[test]
    fn long_aged_old_snow_is_confident() {
        let t = Thresholds::default();
        assert_eq!(dry_aging(5, -4.0, -2.0, &t).confidence, Confidence::Medium);
        assert_eq!(dry_aging(9, -4.0, -2.0, &t).confidence, Confidence::High);
    }
}
