//! Simulator lifecycle state.

use std::fmt;

/// Lifecycle state of a simulator.
///
/// Exactly one state is active at a time. The only legal transitions are
///
/// ```text
/// Init --ready()--> Ready --run()--> Running --(loop stops)--> Finished
///  ^                                                              |
///  +---------------------------reset()----------------------------+
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SimState {
    /// Freshly constructed or reset. Nothing may be scheduled.
    #[default]
    Init,
    /// Initial events and an end time may be scheduled.
    Ready,
    /// The event loop is executing; actions may schedule more events.
    Running,
    /// The run has stopped. Only `reset()` is accepted.
    Finished,
}

impl SimState {
    /// Upper-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
        }
    }

    /// Whether events and end times may be scheduled in this state.
    pub fn accepts_scheduling(self) -> bool {
        matches!(self, Self::Ready | Self::Running)
    }
}

impl fmt::Display for SimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_init() {
        assert_eq!(SimState::default(), SimState::Init);
    }

    #[test]
    fn names_are_upper_case() {
        assert_eq!(SimState::Init.to_string(), "INIT");
        assert_eq!(SimState::Ready.to_string(), "READY");
        assert_eq!(SimState::Running.to_string(), "RUNNING");
        assert_eq!(SimState::Finished.to_string(), "FINISHED");
    }

    #[test]
    fn only_ready_and_running_accept_scheduling() {
        assert!(!SimState::Init.accepts_scheduling());
        assert!(SimState::Ready.accepts_scheduling());
        assert!(SimState::Running.accepts_scheduling());
        assert!(!SimState::Finished.accepts_scheduling());
    }
}
