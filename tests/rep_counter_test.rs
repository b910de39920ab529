/// Integration tests for the repetition/set counter
///
/// Covers:
/// - Debouncing of sustained in-range poses
/// - Set rollover and session completion
/// - Reset from every state, including completion
/// - Unavailable samples and the active-session guard
use assert_matches::assert_matches;
use formcheck::models::{AngleRange, CounterEvent, SessionStatus, Stage};
use formcheck::services::{RepCounter, Targets};
use pretty_assertions::assert_eq;

fn counter(reps_per_set: u32, sets: u32) -> RepCounter {
    let mut counter = RepCounter::new(
        AngleRange::new(160.0, 180.0).unwrap(),
        Targets::new(reps_per_set, sets).unwrap(),
    );
    counter.start();
    counter
}

fn feed(counter: &mut RepCounter, samples: &[Option<f32>]) -> Vec<CounterEvent> {
    samples
        .iter()
        .flat_map(|sample| counter.observe(*sample))
        .collect()
}

fn full_cycle(counter: &mut RepCounter) -> Vec<CounterEvent> {
    feed(counter, &[Some(170.0), Some(120.0)])
}

#[test]
fn test_duplicate_in_range_samples_count_once() {
    let mut counter = counter(10, 1);
    let events = feed(
        &mut counter,
        &[Some(170.0), Some(172.0), Some(175.0), Some(100.0)],
    );

    assert_eq!(events, vec![CounterEvent::RepetitionCompleted { reps: 1, set: 1 }]);
    assert_eq!(counter.state().reps, 1);
}

#[test]
fn test_sustained_in_range_never_counts() {
    let mut counter = counter(10, 1);
    let events = feed(&mut counter, &[Some(170.0), Some(170.0), Some(170.0)]);

    assert!(events.is_empty());
    assert_eq!(counter.state().reps, 0);
    assert_eq!(counter.state().stage, Stage::In);
    assert_eq!(counter.status(), SessionStatus::Active);
}

#[test]
fn test_out_of_range_samples_alone_never_count() {
    let mut counter = counter(10, 1);
    let events = feed(&mut counter, &[Some(90.0), Some(100.0), Some(120.0)]);

    assert!(events.is_empty());
    assert_eq!(counter.state().stage, Stage::Out);
}

#[test]
fn test_range_bounds_are_inclusive() {
    let mut counter = counter(10, 1);
    counter.observe(Some(160.0));
    assert_eq!(counter.state().stage, Stage::In);
    counter.observe(Some(180.0));
    assert_eq!(counter.state().stage, Stage::In);
    counter.observe(Some(180.5));
    assert_eq!(counter.state().stage, Stage::Out);
    assert_eq!(counter.state().reps, 1);
}

#[test]
fn test_set_rollover() {
    let mut counter = counter(2, 2);

    full_cycle(&mut counter);
    let events = full_cycle(&mut counter);

    assert_eq!(
        events,
        vec![
            CounterEvent::RepetitionCompleted { reps: 2, set: 1 },
            CounterEvent::SetCompleted { set: 1, sets_remaining: 1 },
        ]
    );
    let state = counter.state();
    assert_eq!(state.reps, 0);
    assert_eq!(state.sets_remaining, 1);
    assert_eq!(state.stage, Stage::Out);
    assert_eq!(counter.status(), SessionStatus::Active);

    full_cycle(&mut counter);
    let events = full_cycle(&mut counter);

    assert_eq!(
        events,
        vec![
            CounterEvent::RepetitionCompleted { reps: 2, set: 2 },
            CounterEvent::SetCompleted { set: 2, sets_remaining: 0 },
            CounterEvent::SessionCompleted { sets: 2 },
        ]
    );
    let state = counter.state();
    assert_eq!(state.sets_remaining, 0);
    assert_eq!(state.reps, 2);
    assert_eq!(counter.status(), SessionStatus::Complete);
}

#[test]
fn test_completed_session_ignores_samples() {
    let mut counter = counter(1, 1);
    full_cycle(&mut counter);
    assert_eq!(counter.status(), SessionStatus::Complete);

    let before = counter.state();
    let events = feed(&mut counter, &[Some(170.0), Some(100.0), Some(170.0)]);

    assert!(events.is_empty());
    assert_eq!(counter.state(), before);
}

#[test]
fn test_reset_from_any_state() {
    let mut counter = counter(3, 2);

    // Mid-repetition
    counter.observe(Some(170.0));
    counter.reset();
    let state = counter.state();
    assert_eq!((state.stage, state.reps, state.sets_remaining), (Stage::Out, 0, 2));

    // Mid-set
    full_cycle(&mut counter);
    counter.reset();
    let state = counter.state();
    assert_eq!((state.stage, state.reps, state.sets_remaining), (Stage::Out, 0, 2));

    // Completed
    for _ in 0..6 {
        full_cycle(&mut counter);
    }
    assert_eq!(counter.status(), SessionStatus::Complete);
    counter.reset();
    let state = counter.state();
    assert_eq!((state.stage, state.reps, state.sets_remaining), (Stage::Out, 0, 2));
    assert_eq!(counter.status(), SessionStatus::Idle);

    // Reset is the way out of completion: counting resumes after a new start
    counter.start();
    let events = full_cycle(&mut counter);
    assert_matches!(events.as_slice(), [CounterEvent::RepetitionCompleted { reps: 1, set: 1 }]);
}

#[test]
fn test_unavailable_samples_never_mutate_state() {
    let mut counter = counter(3, 2);

    let initial = counter.state();
    assert!(counter.observe(None).is_empty());
    assert_eq!(counter.state(), initial);

    counter.observe(Some(170.0));
    let inside = counter.state();
    assert!(feed(&mut counter, &[None, None, None]).is_empty());
    assert_eq!(counter.state(), inside);

    // Occlusion mid-repetition does not break the crossing
    let events = feed(&mut counter, &[None, Some(110.0)]);
    assert_eq!(events, vec![CounterEvent::RepetitionCompleted { reps: 1, set: 1 }]);
}

#[test]
fn test_documented_angle_sequence() {
    let mut counter = counter(2, 3);

    // Entry, dwell, exit: exactly one repetition
    let events = feed(&mut counter, &[Some(170.0), Some(175.0), Some(150.0)]);
    assert_eq!(events, vec![CounterEvent::RepetitionCompleted { reps: 1, set: 1 }]);
    assert_eq!(counter.state().stage, Stage::Out);
    assert_eq!(counter.state().reps, 1);

    // Re-entry and a second exit finish the first set
    let events = feed(&mut counter, &[Some(170.0), Some(140.0)]);
    assert_eq!(
        events,
        vec![
            CounterEvent::RepetitionCompleted { reps: 2, set: 1 },
            CounterEvent::SetCompleted { set: 1, sets_remaining: 2 },
        ]
    );
    assert_eq!(counter.state().stage, Stage::Out);
    assert_eq!(counter.state().reps, 0);
}

#[test]
fn test_samples_before_start_are_ignored() {
    let mut counter = RepCounter::new(
        AngleRange::new(160.0, 180.0).unwrap(),
        Targets::new(1, 1).unwrap(),
    );

    assert!(feed(&mut counter, &[Some(170.0), Some(100.0)]).is_empty());
    assert_eq!(counter.status(), SessionStatus::Idle);

    counter.start();
    let events = feed(&mut counter, &[Some(170.0), Some(100.0)]);
    assert_eq!(events.len(), 3);
    assert_eq!(counter.status(), SessionStatus::Complete);
}

#[test]
fn test_invariants_hold_over_long_run() {
    let mut counter = counter(4, 3);
    let angles = [170.0, 120.0, 165.0, 175.0, 90.0, 160.0, 181.0, 179.0, 10.0];

    for angle in angles.iter().cycle().take(200) {
        counter.observe(Some(*angle));
        let state = counter.state();
        assert!(state.reps <= state.target_reps_per_set);
        assert!(state.sets_remaining <= state.target_sets);
    }
    assert_eq!(counter.status(), SessionStatus::Complete);
}
