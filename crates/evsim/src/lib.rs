//! evsim: a single-threaded discrete-event simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API of the
//! evsim sub-crates. Adding `evsim` as a single dependency is enough for
//! most users.
//!
//! # Quick start
//!
//! ```rust
//! use evsim::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let fired = Rc::new(RefCell::new(Vec::new()));
//! let mut sim = Simulator::new();
//! sim.ready().unwrap();
//!
//! for delay in [30, 10, 20] {
//!     let fired = Rc::clone(&fired);
//!     sim.schedule(delay, move |s: &mut Simulator| {
//!         fired.borrow_mut().push(s.now().ticks());
//!         Ok(())
//!     })
//!     .unwrap();
//! }
//! sim.end(25).unwrap();
//!
//! let metrics = sim.run().unwrap();
//! assert_eq!(*fired.borrow(), vec![10, 20]);
//! assert_eq!(sim.now(), SimTime(25));
//! assert_eq!(metrics.stop_reason, StopReason::EndTimeReached);
//! assert!(sim.is_finished());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `evsim-core` | Clock, event ids, lifecycle state, errors |
//! | [`engine`] | `evsim-engine` | Simulator, event queue, config, run metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`evsim-core`).
///
/// Contains [`types::SimTime`], [`types::SimState`], [`types::EventSeq`]
/// and the [`types::SimError`] returned by every lifecycle operation.
pub use evsim_core as types;

/// The simulation engine (`evsim-engine`).
///
/// [`engine::Simulator`] drives the run loop over an
/// [`engine::EventQueue`].
pub use evsim_engine as engine;

/// Common imports for typical evsim usage.
///
/// ```rust
/// use evsim::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use evsim_core::{Priority, SimState, SimTime, DEFAULT_PRIORITY};

    // Errors
    pub use evsim_core::{ConfigError, SimError};

    // Engine
    pub use evsim_engine::{RunMetrics, Simulator, SimulatorConfig, StopReason};
}
