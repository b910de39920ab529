/// Exercise session driver
///
/// Owns one pose estimator and runs the per-tick pipeline:
/// frame → joint sample → angle → counter → feedback and statistics.
/// Everything is synchronous; the caller decides how ticks are paced.

use serde::Serialize;

use crate::config::SessionConfig;
use crate::errors::{ConfigError, SessionError};
use crate::models::exercise::{AngleRange, ExerciseKind, Side};
use crate::models::keypoint::JointTriple;
use crate::models::session::{CounterEvent, CounterState, SessionStatus};
use crate::services::angle_estimator::AngleEstimator;
use crate::services::feedback::FormFeedback;
use crate::services::pose_source::PoseEstimator;
use crate::services::rep_counter::{RepCounter, Targets};
use crate::services::session_stats::SessionStats;

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutcome {
    pub frame_index: u64,
    pub angle: Option<f32>,
    pub feedback: FormFeedback,
    pub events: Vec<CounterEvent>,
    pub state: CounterState,
}

impl TickOutcome {
    pub fn session_completed(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, CounterEvent::SessionCompleted { .. }))
    }
}

pub struct ExerciseSession<E: PoseEstimator> {
    estimator: E,
    estimator_open: bool,
    angle_estimator: AngleEstimator,
    counter: RepCounter,
    config: SessionConfig,
    joints: JointTriple,
    stats: SessionStats,
}

impl<E: PoseEstimator> ExerciseSession<E> {
    pub fn new(estimator: E, config: SessionConfig) -> Result<Self, SessionError> {
        let angle_estimator = config.estimator()?;
        let targets = config.targets()?;
        let range = config.ranges.range_for(config.exercise, config.side);

        Ok(Self {
            estimator,
            estimator_open: false,
            angle_estimator,
            counter: RepCounter::new(range, targets),
            joints: config.exercise.joints(config.side),
            stats: SessionStats::new(config.exercise, config.side),
            config,
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.counter.status()
    }

    pub fn snapshot(&self) -> CounterState {
        self.counter.state()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn range(&self) -> AngleRange {
        self.counter.range()
    }

    pub fn joints(&self) -> JointTriple {
        self.joints
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Open the estimator and begin counting from zero
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.status() == SessionStatus::Active {
            return Ok(());
        }

        if !self.estimator_open {
            self.estimator.open()?;
            self.estimator_open = true;
        }

        self.counter.start();
        self.stats = SessionStats::new(self.config.exercise, self.config.side);
        self.stats.mark_started();
        Ok(())
    }

    /// Process one frame.
    ///
    /// Returns `Ok(None)` without touching the estimator when the session is
    /// not active, and when the estimator has no more frames (which also
    /// stops the session).
    pub fn tick(&mut self) -> Result<Option<TickOutcome>, SessionError> {
        if self.status() != SessionStatus::Active {
            return Ok(None);
        }

        let frame = match self.estimator.estimate() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::info!(frames = self.stats.frames, "Pose stream ended");
                self.stop();
                return Ok(None);
            }
            Err(e) => {
                self.stop();
                return Err(e.into());
            }
        };

        let angle = frame
            .landmarks
            .as_deref()
            .and_then(|landmarks| self.angle_estimator.estimate_from_landmarks(landmarks, self.joints));

        tracing::debug!(
            frame = frame.index,
            exercise = %self.config.exercise,
            side = %self.config.side,
            angle = ?angle,
            "Processed frame"
        );

        let range = self.counter.range();
        let events = self.counter.observe(angle);
        let in_range = angle.is_some_and(|angle| range.contains(angle));
        self.stats.record(angle, in_range, &events);

        if self.status() == SessionStatus::Complete {
            self.stats.mark_finished();
            self.close_estimator();
        }

        Ok(Some(TickOutcome {
            frame_index: frame.index,
            angle,
            feedback: FormFeedback::evaluate(angle, range),
            events,
            state: self.counter.state(),
        }))
    }

    /// Stop counting and release the estimator, keeping the counts
    pub fn stop(&mut self) {
        self.counter.stop();
        self.stats.mark_finished();
        self.close_estimator();
    }

    /// Zero the counter for the current exercise and targets
    pub fn reset(&mut self) {
        self.counter.reset();
        self.restart_stats();
    }

    /// Switch exercise and side; resets the counter
    pub fn select(&mut self, exercise: ExerciseKind, side: Side) {
        self.config.exercise = exercise;
        self.config.side = side;
        self.joints = exercise.joints(side);

        let range = self.config.ranges.range_for(exercise, side);
        self.counter.reconfigure(range, self.counter.targets());
        self.restart_stats();
        tracing::info!(%exercise, %side, %range, "Exercise selected");
    }

    /// Change the goals; resets the counter
    pub fn set_targets(&mut self, reps_per_set: u32, sets: u32) -> Result<(), ConfigError> {
        let targets = Targets::new(reps_per_set, sets)?;
        self.config.target_reps_per_set = reps_per_set;
        self.config.target_sets = sets;

        self.counter.reconfigure(self.counter.range(), targets);
        self.restart_stats();
        Ok(())
    }

    fn restart_stats(&mut self) {
        self.stats = SessionStats::new(self.config.exercise, self.config.side);
        if self.status() == SessionStatus::Active {
            self.stats.mark_started();
        }
    }

    fn close_estimator(&mut self) {
        if self.estimator_open {
            self.estimator.close();
            self.estimator_open = false;
        }
    }
}

impl<E: PoseEstimator> Drop for ExerciseSession<E> {
    fn drop(&mut self) {
        self.close_estimator();
    }
}
