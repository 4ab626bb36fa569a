//! NURBS core algorithms: knot spans, basis functions, homogeneous
//! coordinates, and curve evaluation.

pub mod basis;
pub mod eval;
pub mod homogeneous;
pub mod knot;
pub mod rational;

pub use basis::{basis_functions, basis_functions_at, derivative_basis_functions, DerivativeTable};
pub use eval::{
    curve_derivatives, curve_point, rational_curve_point, span_derivatives, span_point,
};
pub use homogeneous::{dehomogenize, homogenize, weights};
pub use knot::{find_span, KnotVector};
pub use rational::{binomial, rational_derivatives};
