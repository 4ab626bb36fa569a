//! Knot vectors and the knot span search.

use std::ops::Deref;

use knotwork_core::{KnotworkError, Result, Tolerance};
use knotwork_math::Interval;
use serde::{Deserialize, Serialize};

/// A validated, non-decreasing knot vector.
///
/// Immutable once built; dereferences to `[f64]` so it can be handed to the
/// slice-based evaluation functions directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct KnotVector(Vec<f64>);

impl KnotVector {
    /// Build a knot vector, rejecting empty, non-finite or decreasing sequences.
    pub fn new(knots: Vec<f64>) -> Result<Self> {
        if knots.is_empty() {
            return Err(KnotworkError::InvalidKnotVector("knot vector is empty".into()));
        }
        if let Some(i) = knots.iter().position(|k| !k.is_finite()) {
            return Err(KnotworkError::InvalidKnotVector(format!(
                "knot {} is not finite: {}",
                i, knots[i]
            )));
        }
        if let Some(i) = knots.windows(2).position(|w| w[1] < w[0]) {
            return Err(KnotworkError::InvalidKnotVector(format!(
                "knots must be non-decreasing, but knot {} ({}) > knot {} ({})",
                i,
                knots[i],
                i + 1,
                knots[i + 1]
            )));
        }
        Ok(Self(knots))
    }

    /// Clamped knot vector over `[0, 1]` with uniformly spaced interior knots.
    ///
    /// The result has `control_point_count + degree + 1` knots, the first and
    /// last of which are repeated `degree + 1` times.
    pub fn clamped_uniform(degree: usize, control_point_count: usize) -> Result<Self> {
        if control_point_count <= degree {
            return Err(KnotworkError::MalformedCurve(format!(
                "a degree {} curve needs more than {} control points, got {}",
                degree, degree, control_point_count
            )));
        }

        let interior = control_point_count - degree - 1;
        let mut knots = Vec::with_capacity(control_point_count + degree + 1);
        knots.extend(std::iter::repeat(0.0).take(degree + 1));
        for i in 1..=interior {
            knots.push(i as f64 / (interior + 1) as f64);
        }
        knots.extend(std::iter::repeat(1.0).take(degree + 1));

        Ok(Self(knots))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of knots equal to `u` within [`Tolerance::KNOT_EPSILON`].
    pub fn multiplicity(&self, u: f64) -> usize {
        let tol = Tolerance::DEFAULT;
        self.0.iter().filter(|&&k| tol.knot_eq(k, u)).count()
    }

    /// Whether both end knots are repeated at least `degree + 1` times.
    pub fn is_clamped(&self, degree: usize) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(&first), Some(&last)) => {
                self.multiplicity(first) > degree && self.multiplicity(last) > degree
            }
            _ => false,
        }
    }

    /// The valid parameter range `[knots[degree], knots[len - degree - 1]]`.
    pub fn domain(&self, degree: usize) -> Result<Interval> {
        let len = self.0.len();
        let required = degree.checked_add(1).and_then(|d| d.checked_mul(2));
        if required.map_or(true, |required| len < required) {
            return Err(KnotworkError::InvalidKnotVector(format!(
                "{} knots cannot carry a degree {} curve",
                len, degree
            )));
        }
        Ok(Interval::new(self.0[degree], self.0[len - degree - 1]))
    }

    /// Locate the span containing `t`, deriving the last control point index from the length.
    pub fn span(&self, degree: usize, t: f64) -> Result<usize> {
        let n = last_control_point_index(degree, &self.0)?;
        find_span(degree, &self.0, n, t)
    }
}

impl Deref for KnotVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for KnotVector {
    type Error = KnotworkError;

    fn try_from(knots: Vec<f64>) -> Result<Self> {
        Self::new(knots)
    }
}

impl From<KnotVector> for Vec<f64> {
    fn from(knots: KnotVector) -> Self {
        knots.0
    }
}

/// Highest control point index `n` implied by a knot vector of the given degree.
pub(crate) fn last_control_point_index(degree: usize, knots: &[f64]) -> Result<usize> {
    if degree.checked_add(2).map_or(true, |required| knots.len() < required) {
        return Err(KnotworkError::MalformedCurve(format!(
            "{} knots cannot carry a degree {} curve",
            knots.len(),
            degree
        )));
    }
    Ok(knots.len() - degree - 2)
}

/// Find the knot span index for parameter `t` in the knot vector.
///
/// Returns the index `i` such that `knots[i] <= t < knots[i+1]`. Parameters
/// within [`Tolerance::KNOT_EPSILON`] of either end of the domain are clamped to
/// the first or last span of non-zero width; anything further out is rejected.
///
/// # Arguments
/// * `degree` - Degree of the B-spline
/// * `knots` - The knot vector
/// * `n` - Number of control points minus 1
/// * `t` - Parameter value
pub fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> Result<usize> {
    if degree > n || n.checked_add(2).map_or(true, |required| knots.len() < required) {
        return Err(KnotworkError::MalformedCurve(format!(
            "{} knots cannot carry control point index {} at degree {}",
            knots.len(),
            n,
            degree
        )));
    }

    let eps = Tolerance::KNOT_EPSILON;
    let (min, max) = (knots[degree], knots[n + 1]);
    if !t.is_finite() || t < min - eps || t > max + eps {
        return Err(KnotworkError::ParameterOutOfDomain {
            parameter: t,
            min,
            max,
        });
    }

    if max <= min {
        return Err(KnotworkError::MalformedCurve(format!(
            "empty parameter domain [{}, {}]",
            min, max
        )));
    }

    // End knots repeated more than degree + 1 times leave zero-width end spans
    if t > max - eps {
        let mut span = n;
        while knots[span] >= knots[span + 1] {
            span -= 1;
        }
        return Ok(span);
    }
    if t < min + eps {
        let mut span = degree;
        while knots[span] >= knots[span + 1] {
            span += 1;
        }
        return Ok(span);
    }

    // Binary search; knots[low] <= t < knots[high] holds throughout
    let mut low = degree;
    let mut high = n + 1;
    let mut mid = low + (high - low) / 2;

    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = low + (high - low) / 2;
    }

    Ok(mid)
}
