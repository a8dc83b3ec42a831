//! Per-run counters reported by the event loop.
//!
//! [`RunMetrics`] is returned by
//! [`Simulator::run()`](crate::simulator::Simulator::run) and retained
//! on the simulator until the next `reset()`.

use std::fmt;

use evsim_core::SimTime;

/// Why the event loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// No pending events were left.
    QueueExhausted,
    /// The next pending event was due at or after the end time.
    EndTimeReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueExhausted => write!(f, "queue exhausted"),
            Self::EndTimeReached => write!(f, "end time reached"),
        }
    }
}

/// Counters collected over one complete run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunMetrics {
    /// Number of actions invoked.
    pub events_executed: u64,
    /// Events scheduled by actions while the run was in progress.
    pub events_scheduled_during_run: u64,
    /// Largest queue length observed before any extraction.
    pub peak_queue_len: usize,
    /// Events left unexecuted in the queue when the loop stopped.
    pub events_remaining: usize,
    /// Clock value after the run, i.e. `now()` in the finished state.
    pub final_time: SimTime,
    /// Effective end time at the moment the loop stopped, if any.
    pub end_time: Option<SimTime>,
    /// Why the loop stopped.
    pub stop_reason: StopReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_reason_display() {
        assert_eq!(StopReason::QueueExhausted.to_string(), "queue exhausted");
        assert_eq!(StopReason::EndTimeReached.to_string(), "end time reached");
    }

    #[test]
    fn metrics_fields_accessible() {
        let m = RunMetrics {
            events_executed: 3,
            events_scheduled_during_run: 1,
            peak_queue_len: 4,
            events_remaining: 1,
            final_time: SimTime(160),
            end_time: Some(SimTime(160)),
            stop_reason: StopReason::EndTimeReached,
        };
        assert_eq!(m.events_executed, 3);
        assert_eq!(m.events_scheduled_during_run, 1);
        assert_eq!(m.peak_queue_len, 4);
        assert_eq!(m.events_remaining, 1);
        assert_eq!(m.final_time, SimTime(160));
        assert_eq!(m.end_time, Some(SimTime(160)));
        assert_eq!(m.stop_reason, StopReason::EndTimeReached);
    }
}
