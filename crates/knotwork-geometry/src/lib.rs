//! Knotwork geometry: NURBS curve evaluation.
//!
//! The [`nurbs`] module holds the slice-based algorithms (knot span search,
//! basis functions and their derivatives, homogeneous coordinates, rational
//! derivatives). [`NurbsCurve`] wraps them behind a validated, immutable
//! curve type that works for 2D and 3D control points alike.

pub mod curve;
pub mod nurbs;

pub use curve::{Curve, NurbsCurve};
pub use nurbs::KnotVector;
