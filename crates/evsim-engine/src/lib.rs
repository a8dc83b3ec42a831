//! Event queue and run loop of the evsim discrete-event simulator.
//!
//! Provides the [`Simulator`], which sequences user actions on a logical
//! clock, together with its [`EventQueue`], construction-time
//! [`SimulatorConfig`] and per-run [`RunMetrics`]. Execution is strictly
//! single-threaded: one action runs at a time, to completion.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod queue;
pub mod simulator;

pub use config::{SimulatorConfig, MAX_QUEUE_CAPACITY};
pub use metrics::{RunMetrics, StopReason};
pub use queue::{EventQueue, ScheduledEvent};
pub use simulator::{Action, Simulator};
