//! Snow-surface classification and glide-product matching.
//!
//! Pipeline:
//!   daily history → snowpack tracker fold → historical assessments
//!   hourly forecast + history + yesterday → current assessment
//!   assessment + temperature → ranked candidates / nearest temperature.
//!
//! Everything here is pure and synchronous. Fetching weather, rendering and
//! persistence belong to the surrounding application.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod recommend;
pub mod report;
pub mod snowpack;

pub use classify::current::{classify_current, classify_current_with};
pub use classify::historical::{classify_day, classify_day_with, classify_history, classify_history_with};
#[cfg(feature = "threading")]
pub use classify::historical::{classify_history_parallel, classify_history_parallel_with};
pub use config::Thresholds;
pub use error::GlideError;
pub use model::assessment::{Confidence, Reason, ReasonCode, SnowSurfaceAssessment, SurfaceMetrics};
pub use model::range::TemperatureRange;
pub use model::snow_type::{SnowType, SwixGroup};
pub use model::weather::{DailySummary, HourlyEntry, PrecipitationKind};
pub use recommend::{nearest_temperature, recommend, Candidate, Recommendation};
pub use report::{ConditionsReport, WeatherPayload};
pub use snowpack::state::SnowpackState;
