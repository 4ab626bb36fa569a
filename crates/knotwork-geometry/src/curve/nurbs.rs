//! NURBS curves over 2D or 3D control points.

use knotwork_core::{KnotworkError, Result, Tolerance, Validate};
use knotwork_math::{ControlPoint, Interval, Point3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::Curve;
use crate::nurbs::{eval, find_span, homogeneous, rational, KnotVector};

/// A NURBS (Non-Uniform Rational B-Spline) curve.
///
/// Without weights the curve is a plain polynomial B-spline. The curve is
/// validated on construction and never changes afterwards, so one instance can
/// be evaluated from many threads at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "NurbsCurveData<P>",
    bound(
        serialize = "P: Serialize",
        deserialize = "P: ControlPoint + Deserialize<'de>"
    )
)]
pub struct NurbsCurve<P = Point3> {
    degree: usize,
    knots: KnotVector,
    control_points: Vec<P>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weights: Option<Vec<f64>>,
}

/// Unvalidated wire form of [`NurbsCurve`].
#[derive(Deserialize)]
struct NurbsCurveData<P> {
    degree: usize,
    knots: KnotVector,
    control_points: Vec<P>,
    #[serde(default)]
    weights: Option<Vec<f64>>,
}

impl<P: ControlPoint> TryFrom<NurbsCurveData<P>> for NurbsCurve<P> {
    type Error = KnotworkError;

    fn try_from(data: NurbsCurveData<P>) -> Result<Self> {
        Self::from_knot_vector(data.degree, data.knots, data.control_points, data.weights)
    }
}

impl<P: ControlPoint> NurbsCurve<P> {
    /// Build a curve, failing fast on any malformed input.
    pub fn new(
        degree: usize,
        knots: Vec<f64>,
        control_points: Vec<P>,
        weights: Option<Vec<f64>>,
    ) -> Result<Self> {
        let knots = KnotVector::new(knots).map_err(|err| {
            debug!(%err, "rejected NURBS knot vector");
            err
        })?;
        Self::from_knot_vector(degree, knots, control_points, weights)
    }

    pub fn from_knot_vector(
        degree: usize,
        knots: KnotVector,
        control_points: Vec<P>,
        weights: Option<Vec<f64>>,
    ) -> Result<Self> {
        let curve = Self {
            degree,
            knots,
            control_points,
            weights,
        };
        curve.validate().map_err(|err| {
            debug!(%err, "rejected NURBS curve");
            err
        })?;

        debug!(
            degree,
            control_points = curve.control_points.len(),
            dim = P::DIM,
            rational = curve.is_rational(),
            "Built NURBS curve"
        );
        Ok(curve)
    }

    /// A polynomial B-spline (every weight is 1).
    pub fn non_rational(degree: usize, knots: Vec<f64>, control_points: Vec<P>) -> Result<Self> {
        Self::new(degree, knots, control_points, None)
    }

    pub fn rational(
        degree: usize,
        knots: Vec<f64>,
        control_points: Vec<P>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        Self::new(degree, knots, control_points, Some(weights))
    }

    /// Clamped curve with uniformly spaced knots over `[0, 1]`.
    pub fn clamped_uniform(
        degree: usize,
        control_points: Vec<P>,
        weights: Option<Vec<f64>>,
    ) -> Result<Self> {
        let knots = KnotVector::clamped_uniform(degree, control_points.len())?;
        Self::from_knot_vector(degree, knots, control_points, weights)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    pub fn control_points(&self) -> &[P] {
        &self.control_points
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Weight of control point `i`; 1 when the curve carries no weights.
    pub fn weight(&self, i: usize) -> f64 {
        self.weights
            .as_ref()
            .and_then(|w| w.get(i).copied())
            .unwrap_or(1.0)
    }

    pub fn is_rational(&self) -> bool {
        self.weights.is_some()
    }

    pub fn domain(&self) -> Interval {
        let n = self.control_points.len() - 1;
        Interval::new(self.knots[self.degree], self.knots[n + 1])
    }

    /// Span containing `t` and the homogeneous form of the `degree + 1`
    /// control points acting on it.
    fn homogeneous_window(&self, t: f64) -> Result<(usize, Vec<P::Homogeneous>)> {
        let span = find_span(self.degree, &self.knots, self.control_points.len() - 1, t)?;
        let range = span - self.degree..=span;
        let weights = self.weights.as_ref().map(|w| &w[range.clone()]);
        let window = homogeneous::homogenize(&self.control_points[range], weights)?;
        Ok((span, window))
    }

    /// Evaluate the curve at parameter `t`.
    pub fn point_at(&self, t: f64) -> Result<P> {
        if self.is_rational() {
            let (span, window) = self.homogeneous_window(t)?;
            let weighted = eval::span_point(self.degree, &self.knots, span, t, &window);
            homogeneous::dehomogenize(weighted)
        } else {
            eval::curve_point(self.degree, &self.knots, &self.control_points, t)
        }
    }

    /// Evaluate at `s` in `[0, 1]`, remapped onto the curve domain.
    pub fn point_at_normalized(&self, s: f64) -> Result<P> {
        self.point_at(Interval::unit().remap(s, &self.domain()))
    }

    /// The 0th through `order`-th derivatives of the weighted curve `(w * C, w)`.
    ///
    /// These are not Cartesian derivatives unless every weight is 1; see
    /// [`NurbsCurve::rational_derivatives`].
    pub fn homogeneous_derivatives(&self, t: f64, order: usize) -> Result<Vec<P::Homogeneous>> {
        let (span, window) = self.homogeneous_window(t)?;
        Ok(eval::span_derivatives(
            self.degree,
            &self.knots,
            span,
            t,
            &window,
            order,
        ))
    }

    /// The point and its first `order` Cartesian derivatives at `t`.
    pub fn rational_derivatives(&self, t: f64, order: usize) -> Result<Vec<P>> {
        let ders = self.homogeneous_derivatives(t, order)?;
        rational::rational_derivatives::<P>(&ders)
    }

    /// First derivative at `t`, unnormalized.
    pub fn tangent_at(&self, t: f64) -> Result<P> {
        let ders = self.rational_derivatives(t, 1)?;
        Ok(ders[1])
    }

    /// Evaluate many parameters in parallel. Fails if any parameter is out of domain.
    pub fn points_at(&self, params: &[f64]) -> Result<Vec<P>> {
        trace!(count = params.len(), "Evaluating NURBS points in parallel");
        params.par_iter().map(|&t| self.point_at(t)).collect()
    }

    /// `count` points at evenly spaced parameters across the domain, ends included.
    pub fn sample(&self, count: usize) -> Result<Vec<P>> {
        let domain = self.domain();
        let params: Vec<f64> = match count {
            0 => Vec::new(),
            1 => vec![domain.min],
            _ => (0..count)
                .map(|i| domain.parameter_at(i as f64 / (count - 1) as f64))
                .collect(),
        };
        self.points_at(&params)
    }

    /// Clamped, with coincident first and last control points.
    pub fn is_closed(&self) -> bool {
        let (Some(&first), Some(&last)) = (self.control_points.first(), self.control_points.last())
        else {
            return false;
        };
        self.knots.is_clamped(self.degree)
            && Tolerance::DEFAULT.is_zero((last - first).length())
    }
}

impl<P: ControlPoint> Validate for NurbsCurve<P> {
    fn validate(&self) -> Result<()> {
        if self.degree < 1 {
            return Err(KnotworkError::MalformedCurve(
                "degree must be at least 1".into(),
            ));
        }

        let count = self.control_points.len();
        if count <= self.degree {
            return Err(KnotworkError::MalformedCurve(format!(
                "a degree {} curve needs more than {} control points, got {}",
                self.degree, self.degree, count
            )));
        }

        if self.knots.len() != count + self.degree + 1 {
            return Err(KnotworkError::MalformedCurve(format!(
                "Knot vector length must be n + p + 1, got {} knots for {} CPs with degree {}",
                self.knots.len(),
                count,
                self.degree
            )));
        }

        let domain = self.domain();
        if domain.length() <= 0.0 {
            return Err(KnotworkError::MalformedCurve(format!(
                "empty parameter domain [{}, {}]",
                domain.min, domain.max
            )));
        }

        if let Some(weights) = &self.weights {
            if weights.len() != count {
                return Err(KnotworkError::MalformedCurve(format!(
                    "Must have same number of weights as control points, got {} weights for {} CPs",
                    weights.len(),
                    count
                )));
            }
            if let Some((i, w)) = weights
                .iter()
                .enumerate()
                .find(|(_, w)| !(w.is_finite() && **w > 0.0))
            {
                return Err(KnotworkError::MalformedCurve(format!(
                    "weight {} must be positive, got {}",
                    i, w
                )));
            }
        }

        Ok(())
    }
}

impl<P: ControlPoint> Curve for NurbsCurve<P> {
    type Point = P;

    fn point_at(&self, t: f64) -> Result<P> {
        NurbsCurve::point_at(self, t)
    }

    fn tangent_at(&self, t: f64) -> Result<P> {
        NurbsCurve::tangent_at(self, t)
    }

    fn derivatives_at(&self, t: f64, order: usize) -> Result<Vec<P>> {
        self.rational_derivatives(t, order)
    }

    fn domain(&self) -> Interval {
        NurbsCurve::domain(self)
    }

    fn is_closed(&self) -> bool {
        NurbsCurve::is_closed(self)
    }
}
