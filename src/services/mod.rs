// Form tracking services

pub mod angle_estimator;
pub mod exercise_session;
pub mod feedback;
pub mod pose_source;
pub mod rep_counter;
pub mod session_stats;

pub use angle_estimator::{compute_interior_angle, AngleEstimator, NormalizationPolicy};
pub use exercise_session::{ExerciseSession, TickOutcome};
pub use feedback::{FormFeedback, Rgb};
pub use pose_source::{PoseEstimator, PoseFrame, RecordedPoseSource};
pub use rep_counter::{RepCounter, Targets};
pub use session_stats::SessionStats;
