/// Errors surfaced by constructors and payload parsing.
///
/// Classification itself never fails; see the module docs in `classify`.
#[derive(Debug, thiserror::Error)]
pub enum GlideError {
    #[error("invalid temperature range: min {min} °C is above max {max} °C")]
    InvalidRange { min: i32, max: i32 },

    #[error("invalid threshold `{name}`: {reason}")]
    InvalidThreshold { name: &'static str, reason: String },

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GlideError>;
