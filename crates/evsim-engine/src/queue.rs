//! Pending-event queue with a total, deterministic order.
//!
//! [`EventQueue`] is a binary min-heap of [`ScheduledEvent`]s keyed by
//! `(due_time, priority, seq)`. The sequence number is minted by the queue
//! itself on every [`push()`](EventQueue::push), so no two pending events
//! ever compare equal and execution order is fully determined by the order
//! of schedule calls.
//!
//! # Ordering
//!
//! - Earlier due time first.
//! - Within a time moment, lower priority value first.
//! - Within equal `(due_time, priority)`, schedule order (lower `seq`) first.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use evsim_core::{EventSeq, Priority, SimTime};

// ── ScheduledEvent ─────────────────────────────────────────────────

/// One pending event: its position in the total order plus its payload.
///
/// Immutable once pushed; the queue hands ownership back on
/// [`pop()`](EventQueue::pop).
pub struct ScheduledEvent<T> {
    /// Absolute time at which the event is due.
    pub due_time: SimTime,
    /// Tie-break within a time moment (lower first).
    pub priority: Priority,
    /// Final tie-break: schedule order.
    pub seq: EventSeq,
    /// What to do when the event fires.
    pub payload: T,
}

impl<T> ScheduledEvent<T> {
    /// The composite ordering key.
    #[inline]
    pub fn key(&self) -> (SimTime, Priority, EventSeq) {
        (self.due_time, self.priority, self.seq)
    }
}

impl<T> fmt::Debug for ScheduledEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledEvent")
            .field("due_time", &self.due_time)
            .field("priority", &self.priority)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl<T> PartialEq for ScheduledEvent<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for ScheduledEvent<T> {}

impl<T> PartialOrd for ScheduledEvent<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed so that `BinaryHeap` (a max-heap) pops the smallest key.
impl<T> Ord for ScheduledEvent<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

// ── EventQueue ─────────────────────────────────────────────────────

/// Min-ordered multiset of pending events.
///
/// Insert and extract-min are `O(log n)`; peek and length are `O(1)`.
pub struct EventQueue<T> {
    heap: BinaryHeap<ScheduledEvent<T>>,
    next_seq: EventSeq,
}

impl<T> EventQueue<T> {
    /// Create an empty queue whose sequence counter starts at 0.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty queue with room for `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: EventSeq(0),
        }
    }

    /// Insert an event, minting its sequence number.
    ///
    /// Returns the sequence number assigned to the event. Panics if the
    /// sequence counter is exhausted (see [`EventSeq::next`]).
    pub fn push(&mut self, due_time: SimTime, priority: Priority, payload: T) -> EventSeq {
        let seq = self.next_seq;
        self.next_seq = seq.next();
        self.heap.push(ScheduledEvent {
            due_time,
            priority,
            seq,
            payload,
        });
        seq
    }

    /// Remove and return the earliest event, or `None` when empty.
    pub fn pop(&mut self) -> Option<ScheduledEvent<T>> {
        self.heap.pop()
    }

    /// The earliest event, without removing it.
    pub fn peek(&self) -> Option<&ScheduledEvent<T>> {
        self.heap.peek()
    }

    /// Due time of the earliest event.
    pub fn peek_due_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|e| e.due_time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The sequence number the next [`push()`](Self::push) will assign.
    pub fn next_seq(&self) -> EventSeq {
        self.next_seq
    }

    /// Discard every pending event without running it and restart the
    /// sequence counter at 0. Allocated capacity is retained.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = EventSeq(0);
    }

    /// Remove all events, returning them in execution order.
    ///
    /// The sequence counter is left untouched.
    pub fn drain_ordered(&mut self) -> Vec<ScheduledEvent<T>> {
        let mut events = Vec::with_capacity(self.heap.len());
        while let Some(e) = self.heap.pop() {
            events.push(e);
        }
        events
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("len", &self.heap.len())
            .field("next_due", &self.peek_due_time())
            .field("next_seq", &self.next_seq)
            .finish()
    }
}
