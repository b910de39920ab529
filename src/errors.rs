use std::path::PathBuf;
use thiserror::Error;

/// Rejected configuration. Raised at construction time, never per sample.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Target repetitions per set must be at least 1, got {0}")]
    InvalidRepsTarget(u32),
    #[error("Target sets must be at least 1, got {0}")]
    InvalidSetsTarget(u32),
    #[error("Invalid angle range [{min}, {max}]")]
    InvalidRange { min: f32, max: f32 },
    #[error("Visibility threshold must be within [0, 1), got {0}")]
    InvalidThreshold(f32),
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),
    #[error("Unknown side: {0}")]
    UnknownSide(String),
    #[error("Unknown normalization policy: {0}")]
    UnknownPolicy(String),
}

/// Failures of a pose source
#[derive(Error, Debug)]
pub enum PoseSourceError {
    #[error("Pose source is not open")]
    NotOpen,
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed pose frame on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid session configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Pose source error: {0}")]
    PoseSource(#[from] PoseSourceError),
}
