//! Test utilities and fixtures for evsim development.
//!
//! Provides a shared [`Trace`] recorder that actions can append to while
//! a run is in progress, action fixtures built on it, and a seeded
//! [`RandomSchedule`] generator for order-checking tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod random;

use std::cell::RefCell;
use std::rc::Rc;

pub use fixtures::{failing, record_now, record_value, Fired};
pub use random::{PlannedEvent, RandomSchedule};

/// Append-only log shared between a test and the actions it schedules.
///
/// Actions must be `'static`, so they cannot borrow test locals; each
/// action holds a clone of the trace instead. Clones share storage.
pub struct Trace<T> {
    entries: Rc<RefCell<Vec<T>>>,
}

impl<T> Trace<T> {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn record(&self, entry: T) {
        self.entries.borrow_mut().push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }
}

impl<T: Clone> Trace<T> {
    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.borrow().clone()
    }
}

impl<T> Clone for Trace<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<T> Default for Trace<T> {
    fn default() -> Self {
        Self::new()
    }
}
