use knotwork_core::Tolerance;
use serde::{Deserialize, Serialize};

/// A closed parameter interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    pub fn mid(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Whether `t` lies in the interval, allowing [`Tolerance::KNOT_EPSILON`] of slack at both ends.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.min - Tolerance::KNOT_EPSILON && t <= self.max + Tolerance::KNOT_EPSILON
    }

    /// Parameter at the normalized position `s` (0 maps to `min`, 1 to `max`).
    pub fn parameter_at(&self, s: f64) -> f64 {
        self.min + s * self.length()
    }

    /// Inverse of [`Interval::parameter_at`]. A zero-length interval maps everything to 0.
    pub fn normalized_parameter(&self, t: f64) -> f64 {
        let len = self.length();
        if len.abs() < Tolerance::KNOT_EPSILON {
            0.0
        } else {
            (t - self.min) / len
        }
    }

    /// Linearly remap `t` from this interval onto `target`.
    pub fn remap(&self, t: f64, target: &Interval) -> f64 {
        target.parameter_at(self.normalized_parameter(t))
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_contains_with_slack() {
        let i = Interval::new(0.0, 5.0);
        assert!(i.contains(0.0));
        assert!(i.contains(5.0));
        assert!(i.contains(5.0 + 1e-12));
        assert!(!i.contains(5.001));
        assert!(!i.contains(-0.001));
    }

    #[test]
    fn test_remap() {
        let src = Interval::new(0.0, 1.0);
        let dst = Interval::new(10.0, 20.0);
        assert_relative_eq!(src.remap(0.25, &dst), 12.5);
        assert_relative_eq!(dst.remap(15.0, &src), 0.5);
    }

    #[test]
    fn test_degenerate_interval() {
        let i = Interval::new(2.0, 2.0);
        assert_eq!(i.length(), 0.0);
        assert_eq!(i.normalized_parameter(2.0), 0.0);
        assert_relative_eq!(i.remap(2.0, &Interval::unit()), 0.0);
    }

    #[test]
    fn test_parameter_at_mid() {
        let i = Interval::new(-1.0, 3.0);
        assert_relative_eq!(i.parameter_at(0.5), i.mid());
        assert_relative_eq!(i.normalized_parameter(3.0), 1.0);
    }
}
