//! evsim quickstart: the full lifecycle of one simulator.
//!
//! Demonstrates:
//!   1. Moving the simulator to READY
//!   2. Scheduling events with and without explicit priorities
//!   3. Setting an end time and scheduling from inside an action
//!   4. Running, reading metrics, and resetting for a second run
//!
//! Run with:
//!   RUST_LOG=evsim_engine=debug cargo run --example quickstart

use evsim_core::SimError;
use evsim_engine::{Simulator, SimulatorConfig};
use tracing_subscriber::EnvFilter;

// ─── Actions ────────────────────────────────────────────────────

fn announce(label: &'static str) -> impl FnOnce(&mut Simulator) -> Result<(), SimError> {
    move |sim| {
        println!("{}: {label}", sim.now());
        Ok(())
    }
}

fn heartbeat(sim: &mut Simulator) -> Result<(), SimError> {
    println!("{}: heartbeat ({} pending)", sim.now(), sim.queue_size());
    sim.schedule(250, heartbeat)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut sim = Simulator::<SimError>::with_config(SimulatorConfig::named("quickstart"))?;

    // ─── First run: bounded by an end time ──────────────────────

    sim.ready()?;
    sim.schedule(44, announce("ABC"))?;
    sim.schedule(967, announce("XYZ"))?;
    sim.schedule_with_priority(100, 77, announce("priority 77"))?;
    sim.schedule_with_priority(100, 44, announce("priority 44"))?;
    sim.schedule(0, heartbeat)?;
    sim.end(1000)?;

    let metrics = sim.run()?;
    println!(
        "run 1 stopped at {} ({}): {} executed, {} left in queue",
        sim.now(),
        metrics.stop_reason,
        metrics.events_executed,
        metrics.events_remaining
    );

    // ─── Second run: stops itself from inside an action ─────────

    sim.reset()?;
    sim.ready()?;
    sim.schedule(100, announce("first"))?;
    sim.schedule(140, |s: &mut Simulator| {
        println!("{}: we are done", s.now());
        s.end_now()
    })?;
    sim.schedule(700, announce("never printed"))?;

    let metrics = sim.run()?;
    println!(
        "run 2 stopped at {} ({}): {} executed",
        sim.now(),
        metrics.stop_reason,
        metrics.events_executed
    );
    sim.reset()?;
    Ok(())
}
