//! Logical simulation time and event priorities.

use std::fmt;

/// Priority of an event within a single time moment.
///
/// Lower values execute earlier among events sharing a due time.
pub type Priority = i64;

/// Priority given to events scheduled without an explicit one.
pub const DEFAULT_PRIORITY: Priority = 0;

/// A point on the simulation's logical clock.
///
/// Time only advances when the engine executes an event; there is no
/// relation to wall-clock time. The clock starts at [`SimTime::ZERO`]
/// and never goes negative, since delays are validated as non-negative
/// before they are added.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimTime(pub i64);

impl SimTime {
    /// The start of every run.
    pub const ZERO: SimTime = SimTime(0);

    /// Raw tick value.
    #[inline]
    pub fn ticks(self) -> i64 {
        self.0
    }

    /// The absolute time `delay` ticks after `self`.
    ///
    /// Returns `None` when the result does not fit in an `i64`.
    #[inline]
    pub fn checked_add_delay(self, delay: i64) -> Option<SimTime> {
        self.0.checked_add(delay).map(SimTime)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

impl From<i64> for SimTime {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_default() {
        assert_eq!(SimTime::default(), SimTime::ZERO);
        assert_eq!(SimTime::ZERO.ticks(), 0);
    }

    #[test]
    fn checked_add_delay_advances() {
        assert_eq!(SimTime(100).checked_add_delay(50), Some(SimTime(150)));
        assert_eq!(SimTime(7).checked_add_delay(0), Some(SimTime(7)));
    }

    #[test]
    fn checked_add_delay_overflow_is_none() {
        assert_eq!(SimTime(i64::MAX).checked_add_delay(1), None);
        assert_eq!(SimTime(1).checked_add_delay(i64::MAX), None);
    }

    #[test]
    fn display_format() {
        assert_eq!(SimTime(42).to_string(), "t=42");
    }

    #[test]
    fn ordering_follows_ticks() {
        assert!(SimTime(3) < SimTime(15));
        assert_eq!(SimTime::from(9), SimTime(9));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn checked_add_delay_never_moves_backwards(
                now in 0i64..=i64::MAX,
                delay in 0i64..=i64::MAX,
            ) {
                match SimTime(now).checked_add_delay(delay) {
                    Some(t) => prop_assert!(t >= SimTime(now)),
                    None => prop_assert!(now.checked_add(delay).is_none()),
                }
            }
        }
    }
}
