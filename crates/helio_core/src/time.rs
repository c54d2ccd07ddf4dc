//! Transition time spans.
//!
//! Animations advance in 100ns ticks. Negative spans are representable
//! (the transition engine runs a timer from `-start_delay`), but every
//! duration consumer clamps negative configuration values to zero rather
//! than rejecting them.

/// Number of ticks per millisecond (100ns ticks).
pub const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Number of ticks per microsecond.
pub const TICKS_PER_MICROSECOND: i64 = 10;

/// A signed time span measured in 100ns ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransitionTimeSpan {
    ticks: i64,
}

impl TransitionTimeSpan {
    /// The zero-length span.
    pub const ZERO: Self = Self { ticks: 0 };

    /// Creates a span from raw ticks.
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Creates a span from milliseconds.
    #[must_use]
    pub const fn from_milliseconds(milliseconds: i64) -> Self {
        Self {
            ticks: milliseconds * TICKS_PER_MILLISECOND,
        }
    }

    /// Creates a span from microseconds.
    #[must_use]
    pub const fn from_microseconds(microseconds: i64) -> Self {
        Self {
            ticks: microseconds * TICKS_PER_MICROSECOND,
        }
    }

    /// Returns the raw tick count.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    /// Returns the span in whole milliseconds (truncated).
    #[must_use]
    pub const fn total_milliseconds(self) -> i64 {
        self.ticks / TICKS_PER_MILLISECOND
    }

    /// Returns this span clamped to be non-negative.
    #[must_use]
    pub const fn clamp_to_non_negative(self) -> Self {
        Self {
            ticks: if self.ticks > 0 { self.ticks } else { 0 },
        }
    }
}

impl core::ops::Add for TransitionTimeSpan {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks.saturating_add(rhs.ticks),
        }
    }
}

impl core::ops::Sub for TransitionTimeSpan {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks.saturating_sub(rhs.ticks),
        }
    }
}

impl core::ops::Neg for TransitionTimeSpan {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            ticks: self.ticks.saturating_neg(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millisecond_round_trip() {
        let span = TransitionTimeSpan::from_milliseconds(150);
        assert_eq!(span.ticks(), 150 * TICKS_PER_MILLISECOND);
        assert_eq!(span.total_milliseconds(), 150);
    }

    #[test]
    fn clamp_to_non_negative() {
        assert_eq!(
            TransitionTimeSpan::from_milliseconds(-5).clamp_to_non_negative(),
            TransitionTimeSpan::ZERO
        );
        let positive = TransitionTimeSpan::from_milliseconds(5);
        assert_eq!(positive.clamp_to_non_negative(), positive);
    }

    #[test]
    fn ordering() {
        assert!(TransitionTimeSpan::from_milliseconds(1) < TransitionTimeSpan::from_milliseconds(2));
        assert!(TransitionTimeSpan::from_milliseconds(-1) < TransitionTimeSpan::ZERO);
    }
}
