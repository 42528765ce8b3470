use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::range::TemperatureRange;
use crate::model::snow_type::SnowType;

/// A glide product as the matcher sees it: an id and its operating ranges.
///
/// Everything else about the product (name, brand, price) stays with the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub ranges: BTreeMap<SnowType, Vec<TemperatureRange>>,
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ranges: BTreeMap::new() }
    }

    pub fn with_range(mut self, snow_type: SnowType, range: TemperatureRange) -> Self {
        self.ranges.entry(snow_type).or_default().push(range);
        self
    }

    /// Ranges defined for `snow_type`; empty when the product doesn't cover it.
    pub fn ranges_for(&self, snow_type: SnowType) -> &[TemperatureRange] {
        self.ranges.get(&snow_type).map_or(&[], Vec::as_slice)
    }
}
