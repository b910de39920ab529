use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::exercise::{ExerciseKind, Side};
use crate::models::session::CounterEvent;

/// Running statistics for one counting session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: Uuid,
    pub exercise: ExerciseKind,
    pub side: Side,
    pub frames: u64,
    pub unavailable_frames: u64,
    pub in_range_frames: u64,
    pub total_reps: u32,
    pub sets_completed: u32,
    pub min_angle: Option<f32>,
    pub max_angle: Option<f32>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SessionStats {
    pub fn new(exercise: ExerciseKind, side: Side) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            exercise,
            side,
            frames: 0,
            unavailable_frames: 0,
            in_range_frames: 0,
            total_reps: 0,
            sets_completed: 0,
            min_angle: None,
            max_angle: None,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn mark_started(&mut self) {
        self.started_at = Some(Utc::now());
        self.finished_at = None;
    }

    pub fn mark_finished(&mut self) {
        if self.started_at.is_some() && self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    /// Record one processed frame
    pub fn record(&mut self, angle: Option<f32>, in_range: bool, events: &[CounterEvent]) {
        self.frames += 1;

        match angle {
            Some(angle) => {
                self.min_angle = Some(self.min_angle.map_or(angle, |min| min.min(angle)));
                self.max_angle = Some(self.max_angle.map_or(angle, |max| max.max(angle)));
                if in_range {
                    self.in_range_frames += 1;
                }
            }
            None => self.unavailable_frames += 1,
        }

        for event in events {
            match event {
                CounterEvent::RepetitionCompleted { .. } => self.total_reps += 1,
                CounterEvent::SetCompleted { .. } => self.sets_completed += 1,
                CounterEvent::SessionCompleted { .. } => {}
            }
        }
    }

    /// Share of frames with a usable angle inside the target range
    pub fn in_range_ratio(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.in_range_frames as f64 / self.frames as f64
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        let started = self.started_at?;
        let finished = self.finished_at.unwrap_or_else(Utc::now);
        Some((finished - started).num_seconds())
    }
}
