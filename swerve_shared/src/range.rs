// src/range.rs - Closed intervals for actuator limits and scaling ranges
use serde::{Deserialize, Serialize};

/// Inclusive membership test: `lo <= value <= hi`.
pub fn in_range(value: f64, range: &Interval) -> bool {
    range.lo <= value && value <= range.hi
}

/// Closed interval `[lo, hi]`, written as a `[min, max]` pair in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: f64) -> bool {
        in_range(value, self)
    }

    /// True when no value satisfies `lo <= x <= hi`. NaN endpoints count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.lo <= self.hi)
    }

    /// Endpoint that becomes the lower bound of `x / divisor` for `x` in this interval.
    ///
    /// Dividing by a negative number reverses the inequality, so the upper
    /// endpoint is returned for `divisor < 0`.
    pub fn lower_at_sign_of(&self, divisor: f64) -> f64 {
        if divisor < 0.0 { self.hi } else { self.lo }
    }

    /// Endpoint that becomes the upper bound of `x / divisor`.
    pub fn upper_at_sign_of(&self, divisor: f64) -> f64 {
        if divisor < 0.0 { self.lo } else { self.hi }
    }
}

impl From<[f64; 2]> for Interval {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Interval> for [f64; 2] {
    fn from(interval: Interval) -> Self {
        [interval.lo, interval.hi]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_is_inclusive() {
        let range = Interval::new(-1.0, 1.0);
        assert!(in_range(-1.0, &range));
        assert!(in_range(1.0, &range));
        assert!(in_range(0.0, &range));
        assert!(!in_range(1.0001, &range));
        assert!(!in_range(f64::NAN, &range));
    }

    #[test]
    fn test_sign_selection() {
        let range = Interval::new(-1.0, 3.0);
        assert_eq!(range.lower_at_sign_of(4.0), -1.0);
        assert_eq!(range.upper_at_sign_of(4.0), 3.0);
        assert_eq!(range.lower_at_sign_of(-4.0), 3.0);
        assert_eq!(range.upper_at_sign_of(-4.0), -1.0);
        // zero is treated as non-negative
        assert_eq!(range.lower_at_sign_of(0.0), -1.0);
    }

    #[test]
    fn test_empty() {
        assert!(!Interval::new(0.0, 0.0).is_empty());
        assert!(Interval::new(0.5, 0.25).is_empty());
        assert!(Interval::new(f64::NAN, 1.0).is_empty());
    }
}
