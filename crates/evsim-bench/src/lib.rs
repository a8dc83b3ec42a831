//! Benchmark profiles for the evsim discrete-event simulator.
//!
//! Provides pre-built workloads shared by the Criterion benches:
//!
//! - [`fan_out_profile`]: a flat schedule of `n` independent events
//! - [`chain_profile`]: a single self-rescheduling event chain
//! - [`spread_delays`]: deterministic delay sequence with many ties

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;

use evsim_core::SimError;
use evsim_engine::{Simulator, SimulatorConfig};

/// Deterministic pseudo-random delays in `0..spread`.
///
/// Uses a fixed LCG so profiles are reproducible without pulling an RNG
/// into the bench crate. Small `spread` values produce many due-time ties,
/// which exercises the priority and sequence tie-breakers.
pub fn spread_delays(n: usize, spread: i64, seed: u64) -> Vec<i64> {
    let spread = spread.max(1) as u64;
    let mut state = seed | 1;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) % spread) as i64
        })
        .collect()
}

/// Build a READY simulator holding `n` independent counting events.
///
/// Returns the simulator together with the shared counter each action
/// increments, so benches can assert the whole schedule ran.
///
/// Fails with the configuration error if `n` exceeds
/// [`MAX_QUEUE_CAPACITY`](evsim_engine::MAX_QUEUE_CAPACITY).
pub fn fan_out_profile(
    n: usize,
    seed: u64,
) -> Result<(Simulator, Rc<Cell<u64>>), Box<dyn Error>> {
    let config = SimulatorConfig {
        name: "fan-out".into(),
        queue_capacity: n,
    };
    let mut sim = Simulator::with_config(config)?;
    sim.ready()?;

    let counter = Rc::new(Cell::new(0u64));
    for delay in spread_delays(n, (n as i64 / 4).max(1), seed) {
        let counter = Rc::clone(&counter);
        sim.schedule(delay, move |_: &mut Simulator| {
            counter.set(counter.get() + 1);
            Ok(())
        })?;
    }
    Ok((sim, counter))
}

fn chain_step(
    remaining: u64,
    counter: Rc<Cell<u64>>,
    sim: &mut Simulator,
) -> Result<(), SimError> {
    counter.set(counter.get() + 1);
    if remaining > 1 {
        sim.schedule(1, move |s: &mut Simulator| chain_step(remaining - 1, counter, s))?;
    }
    Ok(())
}

/// Build a READY simulator with one event that reschedules itself
/// `links - 1` more times, one tick apart.
///
/// The queue never holds more than one entry, so this isolates the
/// per-event cost of the run loop from heap depth.
pub fn chain_profile(links: u64) -> Result<(Simulator, Rc<Cell<u64>>), Box<dyn Error>> {
    let mut sim = Simulator::new();
    sim.ready()?;

    let counter = Rc::new(Cell::new(0u64));
    if links > 0 {
        let c = Rc::clone(&counter);
        sim.schedule(0, move |s: &mut Simulator| chain_step(links, c, s))?;
    }
    Ok((sim, counter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use evsim_core::ConfigError;

    #[test]
    fn spread_delays_is_deterministic_and_bounded() {
        let a = spread_delays(500, 16, 7);
        let b = spread_delays(500, 16, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|d| (0..16).contains(d)));
        assert_ne!(a, spread_delays(500, 16, 8));
    }

    #[test]
    fn fan_out_runs_every_event() {
        let (mut sim, counter) = fan_out_profile(1_000, 3).unwrap();
        assert_eq!(sim.queue_size(), 1_000);
        let metrics = sim.run().unwrap();
        assert_eq!(counter.get(), 1_000);
        assert_eq!(metrics.events_executed, 1_000);
    }

    #[test]
    fn oversized_fan_out_reports_config_error() {
        let err = match fan_out_profile(evsim_engine::MAX_QUEUE_CAPACITY + 1, 1) {
            Ok(_) => panic!("capacity above the maximum must be rejected"),
            Err(e) => e,
        };
        assert!(err.downcast_ref::<ConfigError>().is_some());
        assert!(err.downcast_ref::<SimError>().is_none());
    }

    #[test]
    fn chain_advances_one_tick_per_link() {
        let (mut sim, counter) = chain_profile(250).unwrap();
        sim.run().unwrap();
        assert_eq!(counter.get(), 250);
        assert_eq!(sim.now().ticks(), 249);
    }

    #[test]
    fn empty_chain_finishes_at_zero() {
        let (mut sim, counter) = chain_profile(0).unwrap();
        sim.run().unwrap();
        assert_eq!(counter.get(), 0);
        assert!(sim.is_finished());
    }
}
