//! Error types for the evsim simulator.
//!
//! Two kinds of contract violation exist: calling an operation in a
//! lifecycle state that does not permit it ([`SimError::InvalidState`]),
//! and passing a value that breaks an operation's precondition
//! ([`SimError::InvalidArgument`]). Neither is ever recovered internally.
//! [`ConfigError`] covers simulator construction.

use std::error::Error;
use std::fmt;

use crate::state::SimState;

/// A simulator operation subject to lifecycle checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `ready()`
    Ready,
    /// `schedule()` / `schedule_with_priority()`
    Schedule,
    /// `end()`
    End,
    /// `run()`
    Run,
    /// `reset()`
    Reset,
}

impl Operation {
    /// Method name as written by callers.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Schedule => "schedule",
            Self::End => "end",
            Self::Run => "run",
            Self::Reset => "reset",
        }
    }

    /// The single lifecycle state (or pair of states) in which this
    /// operation is legal, phrased for diagnostics.
    fn requirement(self) -> &'static str {
        match self {
            Self::Ready => "can only become READY when the simulator is INIT",
            Self::Schedule => "scheduling can only be done when the state is READY or RUNNING",
            Self::End => "scheduling end can only be done when the state is READY or RUNNING",
            Self::Run => "run can only be started when the state is READY",
            Self::Reset => "reset can only be performed when the state is FINISHED",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors returned by simulator operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The operation is not permitted in the simulator's current state.
    InvalidState {
        /// The rejected operation.
        operation: Operation,
        /// The state the simulator was in when the call was made.
        state: SimState,
    },
    /// A supplied value violated the operation's precondition.
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl SimError {
    /// Build an [`SimError::InvalidState`].
    pub fn invalid_state(operation: Operation, state: SimState) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Build an [`SimError::InvalidArgument`].
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Whether this is a lifecycle violation.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Whether this is a precondition violation on an argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState { operation, state } => write!(
                f,
                "{operation}: {} (current: {state})",
                operation.requirement()
            ),
            Self::InvalidArgument { argument, reason } => {
                write!(f, "invalid argument `{argument}`: {reason}")
            }
        }
    }
}

impl Error for SimError {}

/// Errors detected while validating a simulator configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The simulator name is empty or whitespace.
    EmptyName,
    /// The queue pre-allocation exceeds the supported maximum.
    QueueCapacityTooLarge {
        /// The configured capacity.
        configured: usize,
        /// The largest accepted capacity.
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "simulator name must not be empty"),
            Self::QueueCapacityTooLarge { configured, max } => {
                write!(f, "queue_capacity {configured} exceeds maximum of {max}")
            }
        }
    }
}

impl Error for ConfigError {}
