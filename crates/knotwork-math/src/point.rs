//! Point types usable as NURBS control points, and their homogeneous forms.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

use glam::{DVec2, DVec3, DVec4};

/// A value that can be combined linearly with real coefficients.
///
/// Basis-function sums are written against this trait so the same loop
/// evaluates Cartesian points and homogeneous points alike.
pub trait Linear:
    Copy
    + Default
    + Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
}

impl<T> Linear for T where
    T: Copy
        + Default
        + Debug
        + Send
        + Sync
        + Add<Output = T>
        + Sub<Output = T>
        + AddAssign
        + SubAssign
        + Mul<f64, Output = T>
        + Div<f64, Output = T>
{
}

/// A Cartesian point with a homogeneous counterpart one dimension higher.
///
/// The homogeneous form of `p` with weight `w` is `(w * p, w)`.
pub trait ControlPoint: Linear + PartialEq {
    type Homogeneous: Linear;

    /// Number of Cartesian coordinates.
    const DIM: usize;

    /// Multiply by `weight` and append the weight as the last coordinate.
    fn to_homogeneous(self, weight: f64) -> Self::Homogeneous;

    /// Split a homogeneous value into its leading coordinates and its last coordinate.
    /// No division is performed.
    fn split_homogeneous(h: Self::Homogeneous) -> (Self, f64);

    fn length(self) -> f64;
}

impl ControlPoint for DVec2 {
    type Homogeneous = DVec3;
    const DIM: usize = 2;

    fn to_homogeneous(self, weight: f64) -> DVec3 {
        (self * weight).extend(weight)
    }

    fn split_homogeneous(h: DVec3) -> (Self, f64) {
        (h.truncate(), h.z)
    }

    fn length(self) -> f64 {
        DVec2::length(self)
    }
}

impl ControlPoint for DVec3 {
    type Homogeneous = DVec4;
    const DIM: usize = 3;

    fn to_homogeneous(self, weight: f64) -> DVec4 {
        (self * weight).extend(weight)
    }

    fn split_homogeneous(h: DVec4) -> (Self, f64) {
        (h.truncate(), h.w)
    }

    fn length(self) -> f64 {
        DVec3::length(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homogeneous_2d() {
        let h = DVec2::new(1.0, 2.0).to_homogeneous(2.0);
        assert_eq!(h, DVec3::new(2.0, 4.0, 2.0));
        let (p, w) = DVec2::split_homogeneous(h);
        assert_eq!(p, DVec2::new(2.0, 4.0));
        assert_eq!(w, 2.0);
    }

    #[test]
    fn test_homogeneous_3d() {
        let h = DVec3::new(1.0, -1.0, 3.0).to_homogeneous(0.5);
        assert_eq!(h, DVec4::new(0.5, -0.5, 1.5, 0.5));
        let (p, w) = DVec3::split_homogeneous(h);
        assert_eq!(p, DVec3::new(0.5, -0.5, 1.5));
        assert_eq!(w, 0.5);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(<DVec2 as ControlPoint>::DIM, 2);
        assert_eq!(<DVec3 as ControlPoint>::DIM, 3);
        assert_eq!(ControlPoint::length(DVec2::new(3.0, 4.0)), 5.0);
    }
}
