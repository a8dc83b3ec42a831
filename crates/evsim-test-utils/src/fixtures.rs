//! Reusable action fixtures.
//!
//! - [`record_now`]: records the clock value when the action fires.
//! - [`record_value`]: records `(now, value)`.
//! - [`failing`]: returns a fixed error when it fires.

use evsim_core::SimTime;
use evsim_engine::Simulator;

use crate::Trace;

/// One executed action as seen by [`record_value`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<V> {
    pub at: SimTime,
    pub value: V,
}

impl<V> Fired<V> {
    pub fn new(at: i64, value: V) -> Self {
        Self {
            at: SimTime(at),
            value,
        }
    }
}

/// Action that records `now()` into `trace`.
pub fn record_now<E>(trace: &Trace<SimTime>) -> impl FnOnce(&mut Simulator<E>) -> Result<(), E> {
    let trace = trace.clone();
    move |sim| {
        trace.record(sim.now());
        Ok(())
    }
}

/// Action that records `(now(), value)` into `trace`.
pub fn record_value<E, V: 'static>(
    trace: &Trace<Fired<V>>,
    value: V,
) -> impl FnOnce(&mut Simulator<E>) -> Result<(), E> {
    let trace = trace.clone();
    move |sim| {
        trace.record(Fired {
            at: sim.now(),
            value,
        });
        Ok(())
    }
}

/// Action that fails with `err` when executed.
pub fn failing<E: 'static>(err: E) -> impl FnOnce(&mut Simulator<E>) -> Result<(), E> {
    move |_| Err(err)
}
