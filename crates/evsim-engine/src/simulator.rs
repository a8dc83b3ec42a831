//! The discrete-event simulator.
//!
//! [`Simulator`] owns the pending-event queue, the logical clock, the
//! lifecycle state and the optional end time. Callers drive it through
//! `ready → schedule* → run → reset`; actions executed by [`run()`]
//! receive the simulator itself and may schedule further events or
//! pull the end time earlier while the loop is in progress.
//!
//! # Ownership model
//!
//! An action is a boxed `FnOnce(&mut Simulator<E>) -> Result<(), E>`.
//! Whatever arguments it needs are captured when the closure is built, so
//! an event carries no further input at execution time. The event is
//! removed from the queue before its action is invoked, which is what lets
//! the action borrow the simulator mutably: no iterator or reference into
//! the queue survives across an action call, and every loop iteration
//! peeks the queue afresh.
//!
//! # Errors
//!
//! Lifecycle and argument violations are reported as [`SimError`]. The
//! action error type `E` defaults to `SimError`; any `E: From<SimError>`
//! may be chosen instead so that actions can use `?` on both simulator
//! calls and their own fallible logic. An action error is returned from
//! [`run()`] unchanged and leaves the simulator `Running`, with the failed
//! event already consumed and the clock at its due time.
//!
//! [`run()`]: Simulator::run

use std::fmt;

use tracing::{debug, info, trace, warn};

use evsim_core::{ConfigError, Operation, Priority, SimError, SimState, SimTime, DEFAULT_PRIORITY};

use crate::config::SimulatorConfig;
use crate::metrics::{RunMetrics, StopReason};
use crate::queue::{EventQueue, ScheduledEvent};

/// Deferred invocation stored in the queue.
pub type Action<E> = Box<dyn FnOnce(&mut Simulator<E>) -> Result<(), E>>;

/// Counters maintained while a run is in progress.
#[derive(Clone, Copy, Debug, Default)]
struct RunCounters {
    executed: u64,
    scheduled: u64,
    peak_queue_len: usize,
}

// ── Simulator ──────────────────────────────────────────────────────

/// Single-threaded discrete-event simulator.
///
/// Each instance is fully independent; any number may coexist.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use evsim_engine::Simulator;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut sim = Simulator::new();
/// sim.ready()?;
/// for delay in [15, 3, 0] {
///     let seen = Rc::clone(&seen);
///     sim.schedule(delay, move |s| {
///         seen.borrow_mut().push(s.now().ticks());
///         Ok(())
///     })?;
/// }
/// sim.run()?;
/// assert_eq!(*seen.borrow(), vec![0, 3, 15]);
/// # Ok::<(), evsim_core::SimError>(())
/// ```
pub struct Simulator<E = SimError> {
    config: SimulatorConfig,
    state: SimState,
    now: SimTime,
    end_time: Option<SimTime>,
    queue: EventQueue<Action<E>>,
    counters: RunCounters,
    last_metrics: Option<RunMetrics>,
}

impl Simulator {
    /// Create a simulator with the default configuration and
    /// [`SimError`] as its action error type.
    pub fn new() -> Self {
        Self::from_valid_config(SimulatorConfig::default())
    }
}

impl<E> Simulator<E> {
    /// Create a simulator from a [`SimulatorConfig`].
    ///
    /// Use a turbofish to pick a custom action error type:
    /// `Simulator::<MyError>::with_config(config)`.
    pub fn with_config(config: SimulatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SimulatorConfig) -> Self {
        let queue = EventQueue::with_capacity(config.queue_capacity);
        Self {
            config,
            state: SimState::Init,
            now: SimTime::ZERO,
            end_time: None,
            queue,
            counters: RunCounters::default(),
            last_metrics: None,
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Move from `Init` to `Ready`, after which initial events may be
    /// scheduled.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidState`] unless the simulator is `Init`.
    pub fn ready(&mut self) -> Result<(), SimError> {
        if self.state != SimState::Init {
            return Err(SimError::invalid_state(Operation::Ready, self.state));
        }
        self.state = SimState::Ready;
        debug!(sim = %self.config.name, "simulator ready");
        Ok(())
    }

    /// Return a finished simulator to `Init`.
    ///
    /// The clock goes back to 0, pending events are dropped without
    /// running, the end time is cleared, the sequence counter restarts
    /// at 0 and the last run's metrics are discarded. Afterwards the
    /// simulator behaves exactly like a freshly constructed one.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidState`] unless the simulator is `Finished`.
    pub fn reset(&mut self) -> Result<(), SimError> {
        if self.state != SimState::Finished {
            return Err(SimError::invalid_state(Operation::Reset, self.state));
        }
        let discarded = self.queue.len();
        self.state = SimState::Init;
        self.now = SimTime::ZERO;
        self.end_time = None;
        self.queue.clear();
        self.counters = RunCounters::default();
        self.last_metrics = None;
        debug!(sim = %self.config.name, discarded, "simulator reset");
        Ok(())
    }

    // ── Scheduling ─────────────────────────────────────────────

    /// Schedule `action` to run `delay` ticks from now with the default
    /// priority (0).
    ///
    /// # Errors
    ///
    /// See [`schedule_with_priority()`](Self::schedule_with_priority).
    pub fn schedule<F>(&mut self, delay: i64, action: F) -> Result<(), SimError>
    where
        F: FnOnce(&mut Simulator<E>) -> Result<(), E> + 'static,
    {
        self.schedule_with_priority(delay, DEFAULT_PRIORITY, action)
    }

    /// Schedule `action` to run `delay` ticks from now.
    ///
    /// Among events due at the same time, lower `priority` values run
    /// first; events with equal time and priority run in the order they
    /// were scheduled.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidState`] unless the simulator is `Ready` or
    ///   `Running`.
    /// - [`SimError::InvalidArgument`] if `delay` is negative or the due
    ///   time would overflow the clock.
    pub fn schedule_with_priority<F>(
        &mut self,
        delay: i64,
        priority: Priority,
        action: F,
    ) -> Result<(), SimError>
    where
        F: FnOnce(&mut Simulator<E>) -> Result<(), E> + 'static,
    {
        if !self.state.accepts_scheduling() {
            return Err(SimError::invalid_state(Operation::Schedule, self.state));
        }
        if delay < 0 {
            return Err(SimError::invalid_argument(
                "delay",
                format!("delay must be non-negative: {delay}"),
            ));
        }
        let due_time = self.now.checked_add_delay(delay).ok_or_else(|| {
            SimError::invalid_argument(
                "delay",
                format!("delay {delay} from {} overflows the simulation clock", self.now),
            )
        })?;

        let seq = self.queue.push(due_time, priority, Box::new(action));
        if self.state == SimState::Running {
            self.counters.scheduled += 1;
        }
        trace!(
            sim = %self.config.name,
            seq = seq.raw(),
            due = due_time.ticks(),
            priority,
            queue_len = self.queue.len(),
            "event scheduled"
        );
        Ok(())
    }

    /// Request that the run stop `delay` ticks from now.
    ///
    /// The effective end time is the minimum over every request, so an
    /// end time can be pulled earlier but never pushed later. Events due
    /// at or after the end time are not executed, so `delay == 0` from
    /// inside a running action makes the loop stop as soon as that
    /// action returns.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidState`] unless the simulator is `Ready` or
    ///   `Running`.
    /// - [`SimError::InvalidArgument`] if `delay` is negative, if `delay`
    ///   is 0 while `Ready`, or if the end time would overflow the clock.
    pub fn end(&mut self, delay: i64) -> Result<(), SimError> {
        if !self.state.accepts_scheduling() {
            return Err(SimError::invalid_state(Operation::End, self.state));
        }
        if delay < 0 {
            return Err(SimError::invalid_argument(
                "delay",
                format!("end delay must be non-negative: {delay}"),
            ));
        }
        if delay == 0 && self.state == SimState::Ready {
            return Err(SimError::invalid_argument(
                "delay",
                "cannot schedule end with zero delay in READY state",
            ));
        }
        let candidate = self.now.checked_add_delay(delay).ok_or_else(|| {
            SimError::invalid_argument(
                "delay",
                format!("end delay {delay} from {} overflows the simulation clock", self.now),
            )
        })?;

        let effective = match self.end_time {
            Some(existing) => existing.min(candidate),
            None => candidate,
        };
        self.end_time = Some(effective);
        debug!(
            sim = %self.config.name,
            requested = candidate.ticks(),
            effective = effective.ticks(),
            "end time updated"
        );
        Ok(())
    }

    /// Shorthand for [`end(0)`](Self::end): stop once the current action
    /// returns. Only meaningful from inside a running action.
    pub fn end_now(&mut self) -> Result<(), SimError> {
        self.end(0)
    }

    // ── Queries ────────────────────────────────────────────────

    /// Current simulation time.
    ///
    /// 0 before any run. During a run, the due time of the executing
    /// event. After a run, the end time if one was set, otherwise the
    /// due time of the last executed event (0 if none ran).
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// Whether the simulator is `Init`.
    pub fn is_init(&self) -> bool {
        self.state == SimState::Init
    }

    /// Whether the simulator is `Ready`.
    pub fn is_ready(&self) -> bool {
        self.state == SimState::Ready
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    /// Whether the last run has finished.
    pub fn is_finished(&self) -> bool {
        self.state == SimState::Finished
    }

    /// Number of pending events.
    ///
    /// Always 0 in `Init`. May be non-zero in `Finished` when the run was
    /// cut off by the end time.
    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    /// Effective end time, if one has been requested.
    pub fn end_time(&self) -> Option<SimTime> {
        self.end_time
    }

    /// Due time of the earliest pending event.
    pub fn next_event_time(&self) -> Option<SimTime> {
        self.queue.peek_due_time()
    }

    /// Metrics of the last completed run, until the next `reset()`.
    pub fn last_metrics(&self) -> Option<&RunMetrics> {
        self.last_metrics.as_ref()
    }

    /// The configuration this simulator was built with.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}

impl<E: From<SimError>> Simulator<E> {
    /// Execute pending events in order until the queue is empty or the
    /// next event is due at or after the end time.
    ///
    /// Each iteration peeks the earliest event, stops if it is not due
    /// strictly before the end time (leaving it queued), otherwise removes
    /// it, advances the clock to its due time and invokes its action.
    /// When the loop stops the clock snaps to the end time if one is set.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidState`] (converted into `E`) unless the
    ///   simulator is `Ready`.
    /// - Any error returned by an action, unchanged. The simulator is
    ///   then left `Running`; only dropping it is meaningful afterwards.
    pub fn run(&mut self) -> Result<RunMetrics, E> {
        if self.state != SimState::Ready {
            return Err(SimError::invalid_state(Operation::Run, self.state).into());
        }
        self.state = SimState::Running;
        self.counters = RunCounters::default();
        info!(
            sim = %self.config.name,
            queued = self.queue.len(),
            end_time = ?self.end_time.map(SimTime::ticks),
            "run started"
        );

        let stop_reason = loop {
            let Some(due) = self.queue.peek_due_time() else {
                break StopReason::QueueExhausted;
            };
            if self.end_time.is_some_and(|end| due >= end) {
                break StopReason::EndTimeReached;
            }
            self.counters.peak_queue_len = self.counters.peak_queue_len.max(self.queue.len());
            let Some(ScheduledEvent {
                due_time,
                priority,
                seq,
                payload: action,
            }) = self.queue.pop()
            else {
                break StopReason::QueueExhausted;
            };

            debug_assert!(due_time >= self.now, "clock moved backwards");
            self.now = due_time;
            self.counters.executed += 1;
            trace!(
                sim = %self.config.name,
                seq = seq.raw(),
                now = due_time.ticks(),
                priority,
                remaining = self.queue.len(),
                "executing event"
            );

            if let Err(err) = action(&mut *self) {
                warn!(
                    sim = %self.config.name,
                    seq = seq.raw(),
                    now = self.now.ticks(),
                    "action failed; run aborted while RUNNING"
                );
                return Err(err);
            }
        };

        if let Some(end) = self.end_time {
            self.now = end;
        }
        self.state = SimState::Finished;

        let metrics = RunMetrics {
            events_executed: self.counters.executed,
            events_scheduled_during_run: self.counters.scheduled,
            peak_queue_len: self.counters.peak_queue_len,
            events_remaining: self.queue.len(),
            final_time: self.now,
            end_time: self.end_time,
            stop_reason,
        };
        info!(
            sim = %self.config.name,
            executed = metrics.events_executed,
            remaining = metrics.events_remaining,
            final_time = metrics.final_time.ticks(),
            stop = %metrics.stop_reason,
            "run finished"
        );
        self.last_metrics = Some(metrics.clone());
        Ok(metrics)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Simulator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("name", &self.config.name)
            .field("state", &self.state)
            .field("now", &self.now)
            .field("end_time", &self.end_time)
            .field("queue_size", &self.queue.len())
            .finish()
    }
}
