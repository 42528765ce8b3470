use serde::{Deserialize, Serialize};

use crate::error::{GlideError, Result};

/// Inclusive whole-degree operating range, `min ≤ max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct TemperatureRange {
    min: i32,
    max: i32,
}

#[derive(Deserialize)]
struct RawRange {
    min: i32,
    max: i32,
}

impl TryFrom<RawRange> for TemperatureRange {
    type Error = GlideError;

    fn try_from(raw: RawRange) -> Result<Self> {
        TemperatureRange::new(raw.min, raw.max)
    }
}

impl TemperatureRange {
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(GlideError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn point(t: i32) -> Self {
        Self { min: t, max: t }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Width in degrees; 0 for a point range.
    pub fn width(&self) -> u32 {
        self.min.abs_diff(self.max)
    }

    pub fn center(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }

    pub fn half_width(&self) -> f64 {
        self.width() as f64 / 2.0
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.min as f64 && t <= self.max as f64
    }

    /// Nearest point of the range to `t`.
    pub fn clamp(&self, t: f64) -> f64 {
        t.clamp(self.min as f64, self.max as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        let err = TemperatureRange::new(-3, -10).unwrap_err();
        assert!(matches!(err, GlideError::InvalidRange { min: -3, max: -10 }));
    }

    #[test]
    fn point_range_contains_only_itself() {
        let r = TemperatureRange::new(-4, -4).unwrap();
        assert_eq!(r.width(), 0);
        assert!(r.contains(-4.0));
        assert!(!r.contains(-3.9));
    }

    #[test]
    fn bounds_are_inclusive() {
        let r = TemperatureRange::new(-10, -3).unwrap();
        assert!(r.contains(-10.0));
        assert!(r.contains(-3.0));
        assert!(!r.contains(-2.5));
        assert_eq!(r.center(), -6.5);
        assert_eq!(r.half_width(), 3.5);
    }

    #[test]
    fn clamp_snaps_to_nearest_bound() {
        let r = TemperatureRange::new(-10, -3).unwrap();
        assert_eq!(r.clamp(-15.0), -10.0);
        assert_eq!(r.clamp(4.0), -3.0);
        assert_eq!(r.clamp(-5.0), -5.0);
    }

    #[test]
    fn deserialization_validates() {
        let ok: TemperatureRange = serde_json::from_str(r#"{"min":-8,"max":-2}"#).unwrap();
        assert_eq!(ok.width(), 6);
        assert!(serde_json::from_str::<TemperatureRange>(r#"{"min":2,"max":-2}"#).is_err());
    }
}
