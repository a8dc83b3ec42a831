//! Integration tests: execution order and termination properties.
//!
//! Seeded random schedules check the `(due_time, priority, schedule
//! order)` rule against a reference sort; proptest covers clock
//! monotonicity under reentrant scheduling and the end-time rules.

use evsim_core::{SimError, SimTime};
use evsim_engine::Simulator;
use evsim_test_utils::{record_value, Fired, PlannedEvent, RandomSchedule, Trace};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────

/// Schedule `events` from a fresh simulator, run it, and return the
/// indices in execution order with the time each one fired.
fn execute(events: &[PlannedEvent]) -> Vec<(i64, usize)> {
    let trace = Trace::new();
    let mut sim = Simulator::new();
    sim.ready().unwrap();
    for e in events {
        sim.schedule_with_priority(e.delay, e.priority, record_value(&trace, e.index))
            .unwrap();
    }
    sim.run().unwrap();
    trace
        .snapshot()
        .into_iter()
        .map(|f: Fired<usize>| (f.at.ticks(), f.value))
        .collect()
}

// ── Seeded matrix ───────────────────────────────────────────────

#[test]
fn random_schedules_match_reference_order() {
    for seed in [8_849_866_351, 17, 424_242, 3, 999_983] {
        for schedule in RandomSchedule::matrix(seed, 1000) {
            let events = schedule.generate();
            let expected: Vec<(i64, usize)> = RandomSchedule::expected_order(&events)
                .into_iter()
                .map(|e| (e.delay, e.index))
                .collect();
            assert_eq!(execute(&events), expected, "mismatch for {schedule:?}");
        }
    }
}

// ── Properties ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn execution_follows_total_order(
        entries in prop::collection::vec((0i64..40, -4i64..4), 0..96)
    ) {
        let events: Vec<PlannedEvent> = entries
            .iter()
            .enumerate()
            .map(|(index, &(delay, priority))| PlannedEvent { index, delay, priority, value: 0 })
            .collect();
        let executed = execute(&events);
        prop_assert_eq!(executed.len(), events.len());
        for w in executed.windows(2) {
            let a = &events[w[0].1];
            let b = &events[w[1].1];
            prop_assert!(
                (a.delay, a.priority, a.index) < (b.delay, b.priority, b.index),
                "out of order: {:?} before {:?}", a, b
            );
        }
    }

    #[test]
    fn clock_never_decreases_with_reentrant_scheduling(
        roots in prop::collection::vec(0i64..100, 1..24),
        child_delays in prop::collection::vec(0i64..30, 0..24),
    ) {
        let times: Trace<SimTime> = Trace::new();
        let mut sim = Simulator::new();
        sim.ready().unwrap();
        for (i, delay) in roots.iter().enumerate() {
            let times = times.clone();
            let child = child_delays.get(i).copied();
            sim.schedule(*delay, move |s: &mut Simulator| {
                times.record(s.now());
                if let Some(d) = child {
                    let times = times.clone();
                    s.schedule(d, move |s: &mut Simulator| {
                        times.record(s.now());
                        Ok(())
                    })?;
                }
                Ok(())
            }).unwrap();
        }
        sim.run().unwrap();

        let seen = times.snapshot();
        prop_assert_eq!(seen.len(), roots.len() + roots.len().min(child_delays.len()));
        for w in seen.windows(2) {
            prop_assert!(w[0] <= w[1], "clock went backwards: {} then {}", w[0], w[1]);
        }
        prop_assert_eq!(sim.now(), *seen.last().unwrap());
    }

    #[test]
    fn earliest_end_wins_and_clock_snaps(
        ends in prop::collection::vec(1i64..300, 1..6),
        delays in prop::collection::vec(0i64..400, 0..48),
    ) {
        let trace = Trace::new();
        let mut sim = Simulator::new();
        sim.ready().unwrap();
        for &d in &ends {
            sim.end(d).unwrap();
        }
        for (i, &d) in delays.iter().enumerate() {
            sim.schedule(d, record_value(&trace, i)).unwrap();
        }
        let metrics = sim.run().unwrap();

        let end = *ends.iter().min().unwrap();
        prop_assert_eq!(sim.end_time(), Some(SimTime(end)));
        prop_assert_eq!(sim.now(), SimTime(end));
        prop_assert_eq!(metrics.final_time, SimTime(end));

        let executed = trace.snapshot();
        prop_assert!(executed.iter().all(|f: &Fired<usize>| f.at < SimTime(end)));
        let due_before_end = delays.iter().filter(|&&d| d < end).count();
        prop_assert_eq!(executed.len(), due_before_end);
        prop_assert_eq!(sim.queue_size(), delays.len() - due_before_end);
    }

    #[test]
    fn end_requested_mid_run_caps_execution(
        trigger in 0i64..100,
        extra in 0i64..50,
        delays in prop::collection::vec(0i64..200, 0..48),
    ) {
        let trace = Trace::new();
        let mut sim = Simulator::new();
        sim.ready().unwrap();
        sim.schedule_with_priority(trigger, i64::MIN, move |s: &mut Simulator| s.end(extra))
            .unwrap();
        for (i, &d) in delays.iter().enumerate() {
            sim.schedule(d, record_value(&trace, i)).unwrap();
        }
        sim.run().unwrap();

        let end = trigger + extra;
        prop_assert_eq!(sim.now(), SimTime(end));
        for f in trace.snapshot() {
            prop_assert!(f.at < SimTime(end));
        }
        let expected = delays.iter().filter(|&&d| d < end).count();
        prop_assert_eq!(trace.len(), expected);
    }
}

#[test]
fn rejected_schedule_leaves_queue_untouched() {
    let trace = Trace::new();
    let mut sim = Simulator::new();
    sim.ready().unwrap();
    sim.schedule(5, record_value(&trace, 'a')).unwrap();
    assert!(matches!(
        sim.schedule(-1, record_value(&trace, '!')),
        Err(SimError::InvalidArgument { .. })
    ));
    assert_eq!(sim.queue_size(), 1);
    sim.schedule(5, record_value(&trace, 'b')).unwrap();
    sim.run().unwrap();
    assert_eq!(trace.snapshot(), vec![Fired::new(5, 'a'), Fired::new(5, 'b')]);
}
