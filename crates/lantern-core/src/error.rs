use thiserror::Error;

/// Malformed scroll curve definitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("curve has no breakpoints")]
    Empty,
    #[error("curve has {breakpoints} breakpoints but {outputs} outputs")]
    LengthMismatch { breakpoints: usize, outputs: usize },
    #[error("breakpoint {index} ({value}) lies outside [0, 1]")]
    OutOfRange { index: usize, value: f32 },
    #[error("breakpoint {index} ({value}) does not increase on the previous one")]
    NotIncreasing { index: usize, value: f32 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("trigger threshold must lie in (0, 1), got {0}")]
    TriggerThreshold(f32),
    #[error("ambient volume must lie in [0, 1], got {0}")]
    Volume(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("playback refused: {reason}")]
pub struct PlaybackRefused {
    pub reason: String,
}

impl PlaybackRefused {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
