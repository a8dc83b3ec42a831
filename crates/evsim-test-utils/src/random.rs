//! Seeded random schedules for ordering tests.
//!
//! [`RandomSchedule`] draws `num_events` events with delays in
//! `[0, max_delay]` and priorities in `[min_priority, max_priority]` from
//! a `ChaCha8Rng`, so a failing case is reproducible from its seed.
//! [`RandomSchedule::expected_order`] is the reference execution order:
//! a plain stable sort by `(delay, priority)` over the generation order.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// One event to be scheduled from the `Ready` state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedEvent {
    /// Position in generation (and therefore schedule) order.
    pub index: usize,
    pub delay: i64,
    pub priority: i64,
    /// Opaque payload used to identify the event in a trace.
    pub value: i64,
}

/// Parameters of a random schedule.
#[derive(Clone, Copy, Debug)]
pub struct RandomSchedule {
    pub seed: u64,
    pub max_delay: i64,
    pub num_events: usize,
    pub min_priority: i64,
    pub max_priority: i64,
}

impl RandomSchedule {
    /// Draw the events in schedule order.
    pub fn generate(&self) -> Vec<PlannedEvent> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        (0..self.num_events)
            .map(|index| PlannedEvent {
                index,
                delay: rng.random_range(0..=self.max_delay),
                priority: rng.random_range(self.min_priority..=self.max_priority),
                value: rng.random_range(-50_000..=100_000),
            })
            .collect()
    }

    /// `events` sorted into the order the simulator must execute them.
    pub fn expected_order(events: &[PlannedEvent]) -> Vec<PlannedEvent> {
        let mut sorted = events.to_vec();
        sorted.sort_by_key(|e| (e.delay, e.priority, e.index));
        sorted
    }

    /// The test matrix: delay spans of 1, 2, 3, 6 and 101 time moments,
    /// each with a single shared priority and with a priority range.
    pub fn matrix(seed: u64, num_events: usize) -> Vec<RandomSchedule> {
        [
            (0, 0, 0),
            (0, -10, 10),
            (1, 0, 0),
            (1, -100, -10),
            (2, 0, 0),
            (2, 65, 3662),
            (5, 66, 66),
            (5, -10, 66),
            (100, -7, -7),
            (100, 0, 10),
        ]
        .into_iter()
        .map(|(max_delay, min_priority, max_priority)| RandomSchedule {
            seed,
            max_delay,
            num_events,
            min_priority,
            max_priority,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_schedule() {
        let s = RandomSchedule {
            seed: 7,
            max_delay: 10,
            num_events: 50,
            min_priority: -3,
            max_priority: 3,
        };
        assert_eq!(s.generate(), s.generate());
    }

    #[test]
    fn draws_stay_in_range() {
        let s = RandomSchedule {
            seed: 99,
            max_delay: 5,
            num_events: 500,
            min_priority: -10,
            max_priority: 66,
        };
        for e in s.generate() {
            assert!((0..=5).contains(&e.delay));
            assert!((-10..=66).contains(&e.priority));
            assert!((-50_000..=100_000).contains(&e.value));
        }
    }

    #[test]
    fn expected_order_is_stable_on_ties() {
        let events = vec![
            PlannedEvent { index: 0, delay: 1, priority: 0, value: 10 },
            PlannedEvent { index: 1, delay: 0, priority: 0, value: 20 },
            PlannedEvent { index: 2, delay: 1, priority: 0, value: 30 },
        ];
        let values: Vec<i64> = RandomSchedule::expected_order(&events)
            .iter()
            .map(|e| e.value)
            .collect();
        assert_eq!(values, vec![20, 10, 30]);
    }

    #[test]
    fn full_width_priority_range_is_sampled() {
        let s = RandomSchedule {
            seed: 3,
            max_delay: 0,
            num_events: 200,
            min_priority: i64::MIN,
            max_priority: i64::MAX,
        };
        let events = s.generate();
        assert_eq!(events.len(), 200);
        assert!(events.iter().any(|e| e.priority < 0));
        assert!(events.iter().any(|e| e.priority > 0));
    }

    #[test]
    fn degenerate_ranges_yield_the_bound() {
        let s = RandomSchedule {
            seed: 11,
            max_delay: 0,
            num_events: 20,
            min_priority: 66,
            max_priority: 66,
        };
        assert!(s.generate().iter().all(|e| e.delay == 0 && e.priority == 66));
    }

    #[test]
    fn matrix_has_ten_cases() {
        assert_eq!(RandomSchedule::matrix(1, 10).len(), 10);
    }
}
