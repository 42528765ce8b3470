//! Shared data model: snow-type taxonomy, temperature ranges, weather inputs
//! and the assessment record both classifiers produce.

pub mod assessment;
pub mod range;
pub mod snow_type;
pub mod weather;
