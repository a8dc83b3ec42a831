//! Core types for the evsim discrete-event simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the logical clock, event identifiers, the lifecycle state enum, and
//! the error types shared by the engine and its callers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod state;
pub mod time;

pub use error::{ConfigError, Operation, SimError};
pub use id::EventSeq;
pub use state::SimState;
pub use time::{Priority, SimTime, DEFAULT_PRIORITY};
