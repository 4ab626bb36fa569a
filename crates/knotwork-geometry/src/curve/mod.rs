//! Curve traits and implementations.

mod nurbs;

use knotwork_core::Result;
use knotwork_math::{ControlPoint, Interval};

pub use nurbs::NurbsCurve;

/// Trait for parametric curves in 2D or 3D space.
pub trait Curve: Send + Sync {
    type Point: ControlPoint;

    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Result<Self::Point>;

    /// Evaluate the (unnormalized) tangent vector at parameter `t`.
    fn tangent_at(&self, t: f64) -> Result<Self::Point>;

    /// The point and its first `order` derivatives at parameter `t`.
    fn derivatives_at(&self, t: f64, order: usize) -> Result<Vec<Self::Point>>;

    /// Return the parameter domain.
    fn domain(&self) -> Interval;

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        false
    }
}
