// Data models for landmarks, exercises and counter state

pub mod exercise;
pub mod keypoint;
pub mod session;

pub use exercise::*;
pub use keypoint::*;
pub use session::*;
