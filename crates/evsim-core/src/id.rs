//! Event sequence numbers.

use std::fmt;

/// Engine-wide, strictly increasing sequence number of a scheduled event.
///
/// Minted once per schedule call, starting at 0 after construction or
/// reset. It is the final tie-break of the event order, which makes that
/// order total: no two pending events ever compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventSeq(pub u64);

impl EventSeq {
    /// Raw counter value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// The sequence number minted after this one.
    ///
    /// # Panics
    ///
    /// Panics if the counter is already at `u64::MAX`. Wrapping to 0
    /// would let the newest event overtake older ties.
    #[inline]
    pub fn next(self) -> EventSeq {
        match self.0.checked_add(1) {
            Some(n) => EventSeq(n),
            None => panic!("EventSeq exhausted at {}", self.0),
        }
    }
}

impl fmt::Display for EventSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for EventSeq {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
