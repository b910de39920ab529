//! Exercise form tracking from pose-estimation landmarks.
//!
//! Computes joint angles from three landmarks, classifies them against a
//! target range and counts repetitions and sets with a debounced state machine.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::SessionConfig;
pub use errors::{ConfigError, PoseSourceError, SessionError};
