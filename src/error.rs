//! Error types
//!
//! Simulation calls fail fast on broken preconditions instead of letting
//! NaNs or negative timers leak into the table.

/// Simulation precondition violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// Time step was zero, negative or not finite.
    #[error("time step must be positive and finite, got {0}")]
    NonPositiveDelta(f32),

    /// Tried to strike a ball that is off the table.
    #[error("ball {0} is pocketed")]
    BallPocketed(u32),

    /// Only the cue ball can be struck.
    #[error("ball {0} is not the cue ball")]
    NotCueBall(u32),

    /// A shot was attempted before the table settled.
    #[error("balls are still in motion")]
    BallsInMotion,

    /// A shot was attempted after the countdown ran out.
    #[error("round countdown has expired")]
    TimeUp,

    /// No ball with this id in the roster.
    #[error("no ball with id {0}")]
    UnknownBall(u32),
}

/// Settings and table geometry errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings were not valid JSON for the schema.
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings parsed but describe an impossible table or match.
    #[error("invalid settings: {0}")]
    Invalid(String),
}
