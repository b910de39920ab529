use serde::{Deserialize, Serialize};

/// Debounce state of the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Last usable angle was outside the target range, or nothing seen yet
    #[default]
    Out,
    /// Last usable angle was inside the target range
    In,
}

/// Whether the counter is accepting samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
    /// All sets done; only a reset leaves this state
    Complete,
}

/// Snapshot of the repetition/set counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub stage: Stage,
    pub reps: u32,
    pub sets_remaining: u32,
    pub target_reps_per_set: u32,
    pub target_sets: u32,
    pub status: SessionStatus,
}

impl CounterState {
    pub fn new(target_reps_per_set: u32, target_sets: u32) -> Self {
        Self {
            stage: Stage::Out,
            reps: 0,
            sets_remaining: target_sets,
            target_reps_per_set,
            target_sets,
            status: SessionStatus::Idle,
        }
    }

    /// 1-based number of the set currently in progress
    pub fn current_set(&self) -> u32 {
        (self.target_sets - self.sets_remaining + 1).min(self.target_sets)
    }

    pub fn sets_completed(&self) -> u32 {
        self.target_sets - self.sets_remaining
    }

    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }
}

/// Discrete notifications emitted by the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CounterEvent {
    /// `reps` is the count within `set` after this repetition
    RepetitionCompleted { reps: u32, set: u32 },
    SetCompleted { set: u32, sets_remaining: u32 },
    SessionCompleted { sets: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = CounterState::new(10, 3);
        assert_eq!(state.stage, Stage::Out);
        assert_eq!(state.reps, 0);
        assert_eq!(state.sets_remaining, 3);
        assert_eq!(state.current_set(), 1);
        assert_eq!(state.sets_completed(), 0);
        assert_eq!(state.status, SessionStatus::Idle);
    }

    #[test]
    fn test_current_set_is_capped_when_finished() {
        let mut state = CounterState::new(2, 2);
        state.sets_remaining = 0;
        assert_eq!(state.current_set(), 2);
        assert_eq!(state.sets_completed(), 2);
    }

    #[test]
    fn test_event_serialization() {
        let event = CounterEvent::RepetitionCompleted { reps: 3, set: 1 };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["event"], "repetition_completed");
        assert_eq!(json["reps"], 3);
    }
}
