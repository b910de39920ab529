/// Repetition/set counter
///
/// A repetition is one full entry into the target range followed by an exit.
/// Sustained in-range poses count once; unavailable samples change nothing.
/// Samples are only accepted while the counter is active.

use crate::errors::ConfigError;
use crate::models::exercise::AngleRange;
use crate::models::session::{CounterEvent, CounterState, SessionStatus, Stage};

/// Session goals, fixed until the next reconfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targets {
    reps_per_set: u32,
    sets: u32,
}

impl Targets {
    pub fn new(reps_per_set: u32, sets: u32) -> Result<Self, ConfigError> {
        if reps_per_set == 0 {
            return Err(ConfigError::InvalidRepsTarget(reps_per_set));
        }
        if sets == 0 {
            return Err(ConfigError::InvalidSetsTarget(sets));
        }
        Ok(Self { reps_per_set, sets })
    }

    pub fn reps_per_set(&self) -> u32 {
        self.reps_per_set
    }

    pub fn sets(&self) -> u32 {
        self.sets
    }
}

pub struct RepCounter {
    range: AngleRange,
    targets: Targets,
    state: CounterState,
}

impl RepCounter {
    pub fn new(range: AngleRange, targets: Targets) -> Self {
        Self {
            range,
            targets,
            state: CounterState::new(targets.reps_per_set, targets.sets),
        }
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn range(&self) -> AngleRange {
        self.range
    }

    pub fn targets(&self) -> Targets {
        self.targets
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    /// Begin accepting samples. Starting a new session clears all counts.
    /// Has no effect on an already active counter.
    pub fn start(&mut self) {
        if self.state.status == SessionStatus::Active {
            return;
        }
        self.reset();
        self.state.status = SessionStatus::Active;
        tracing::info!(
            reps_per_set = self.targets.reps_per_set,
            sets = self.targets.sets,
            range = %self.range,
            "Counting started"
        );
    }

    /// Stop accepting samples, keeping the counts
    pub fn stop(&mut self) {
        if self.state.status == SessionStatus::Active {
            self.state.status = SessionStatus::Idle;
        }
    }

    /// Unconditionally restore `Out`, zero reps and a full set budget.
    ///
    /// An active counter stays active; a completed one becomes idle.
    pub fn reset(&mut self) {
        let status = match self.state.status {
            SessionStatus::Active => SessionStatus::Active,
            SessionStatus::Idle | SessionStatus::Complete => SessionStatus::Idle,
        };
        self.state = CounterState::new(self.targets.reps_per_set, self.targets.sets);
        self.state.status = status;
        tracing::debug!(?status, "Counter reset");
    }

    /// Switch range and targets, then reset
    pub fn reconfigure(&mut self, range: AngleRange, targets: Targets) {
        self.range = range;
        self.targets = targets;
        self.reset();
    }

    /// Feed one sample. `None` means the joint was not visible this tick.
    pub fn observe(&mut self, angle: Option<f32>) -> Vec<CounterEvent> {
        let mut events = Vec::new();

        if self.state.status != SessionStatus::Active {
            tracing::trace!(status = ?self.state.status, "Sample ignored");
            return events;
        }

        let Some(angle) = angle else {
            return events;
        };

        let inside = self.range.contains(angle);

        match (self.state.stage, inside) {
            (Stage::Out, true) => {
                self.state.stage = Stage::In;
            }
            (Stage::In, false) => {
                self.state.stage = Stage::Out;
                self.complete_repetition(&mut events);
            }
            _ => {}
        }

        events
    }

    fn complete_repetition(&mut self, events: &mut Vec<CounterEvent>) {
        let set = self.state.current_set();
        self.state.reps += 1;
        events.push(CounterEvent::RepetitionCompleted {
            reps: self.state.reps,
            set,
        });
        tracing::debug!(reps = self.state.reps, set, "Repetition completed");

        if self.state.reps < self.targets.reps_per_set {
            return;
        }

        self.state.sets_remaining -= 1;
        events.push(CounterEvent::SetCompleted {
            set,
            sets_remaining: self.state.sets_remaining,
        });
        tracing::info!(set, sets_remaining = self.state.sets_remaining, "Set completed");

        if self.state.sets_remaining == 0 {
            self.state.status = SessionStatus::Complete;
            events.push(CounterEvent::SessionCompleted {
                sets: self.targets.sets,
            });
            tracing::info!(sets = self.targets.sets, "Session completed");
        } else {
            self.state.reps = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_counter(reps: u32, sets: u32) -> RepCounter {
        let mut counter = RepCounter::new(
            AngleRange::new(160.0, 180.0).unwrap(),
            Targets::new(reps, sets).unwrap(),
        );
        counter.start();
        counter
    }

    #[test]
    fn test_targets_must_be_positive() {
        assert_eq!(Targets::new(0, 3), Err(ConfigError::InvalidRepsTarget(0)));
        assert_eq!(Targets::new(10, 0), Err(ConfigError::InvalidSetsTarget(0)));
        assert!(Targets::new(1, 1).is_ok());
    }

    #[test]
    fn test_entry_edge_does_not_count() {
        let mut counter = active_counter(5, 1);
        assert!(counter.observe(Some(170.0)).is_empty());
        assert_eq!(counter.state().stage, Stage::In);
        assert_eq!(counter.state().reps, 0);
    }

    #[test]
    fn test_exit_edge_counts() {
        let mut counter = active_counter(5, 1);
        counter.observe(Some(170.0));
        let events = counter.observe(Some(120.0));

        assert_eq!(events, vec![CounterEvent::RepetitionCompleted { reps: 1, set: 1 }]);
        assert_eq!(counter.state().stage, Stage::Out);
    }

    #[test]
    fn test_idle_counter_ignores_samples() {
        let mut counter = RepCounter::new(
            AngleRange::new(160.0, 180.0).unwrap(),
            Targets::new(5, 1).unwrap(),
        );
        counter.observe(Some(170.0));
        counter.observe(Some(100.0));

        assert_eq!(counter.state().stage, Stage::Out);
        assert_eq!(counter.state().reps, 0);
    }

    #[test]
    fn test_stop_keeps_counts() {
        let mut counter = active_counter(5, 1);
        counter.observe(Some(170.0));
        counter.observe(Some(100.0));
        counter.stop();

        counter.observe(Some(170.0));
        assert_eq!(counter.status(), SessionStatus::Idle);
        assert_eq!(counter.state().reps, 1);
        assert_eq!(counter.state().stage, Stage::Out);
    }

    #[test]
    fn test_start_twice_keeps_progress() {
        let mut counter = active_counter(5, 1);
        counter.observe(Some(170.0));
        counter.observe(Some(100.0));
        counter.start();
        assert_eq!(counter.state().reps, 1);
    }

    #[test]
    fn test_reset_keeps_active_status() {
        let mut counter = active_counter(5, 2);
        counter.observe(Some(170.0));
        counter.reset();

        assert_eq!(counter.status(), SessionStatus::Active);
        assert_eq!(counter.state().stage, Stage::Out);
    }

    #[test]
    fn test_reconfigure_switches_range() {
        let mut counter = active_counter(5, 2);
        counter.observe(Some(170.0));
        counter.reconfigure(
            AngleRange::new(150.0, 170.0).unwrap(),
            Targets::new(3, 1).unwrap(),
        );

        let state = counter.state();
        assert_eq!(state.stage, Stage::Out);
        assert_eq!(state.target_reps_per_set, 3);
        assert_eq!(state.sets_remaining, 1);

        counter.observe(Some(155.0));
        assert_eq!(counter.state().stage, Stage::In);
    }
}
