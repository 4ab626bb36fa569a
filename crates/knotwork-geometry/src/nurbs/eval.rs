//! Curve evaluation: basis functions combined with control points.
//!
//! Every function here is generic over [`Linear`], so the same code evaluates
//! plain Cartesian control points and homogeneous (weighted) ones.

use knotwork_core::{KnotworkError, Result};
use knotwork_math::{ControlPoint, Linear};

use super::basis::{basis_functions, derivative_basis_functions};
use super::homogeneous::dehomogenize;
use super::knot::find_span;

/// Check that `knots` fits `count` control points of `degree`, returning `n = count - 1`.
fn check_layout(degree: usize, knots: &[f64], count: usize) -> Result<usize> {
    if count == 0 {
        return Err(KnotworkError::MalformedCurve("no control points".into()));
    }
    let expected = count.checked_add(degree).and_then(|c| c.checked_add(1));
    if expected != Some(knots.len()) {
        return Err(KnotworkError::MalformedCurve(format!(
            "Knot vector length must be n + p + 1, got {} knots for {} CPs with degree {}",
            knots.len(),
            count,
            degree
        )));
    }
    Ok(count - 1)
}

/// Evaluate a B-spline curve point at parameter `t` using the De Boor algorithm.
///
/// With homogeneous control points the result is the weighted point, not yet
/// projected; see [`rational_curve_point`].
pub fn curve_point<V: Linear>(
    degree: usize,
    knots: &[f64],
    control_points: &[V],
    t: f64,
) -> Result<V> {
    let n = check_layout(degree, knots, control_points.len())?;
    let span = find_span(degree, knots, n, t)?;
    Ok(span_point(
        degree,
        knots,
        span,
        t,
        &control_points[span - degree..=span],
    ))
}

/// Combine the `degree + 1` control points acting on `span` into the curve point at `t`.
///
/// `window[j]` is control point `span - degree + j`.
///
/// # Panics
/// If `span` is not a valid span of `knots` or `window` is shorter than `degree + 1`.
pub fn span_point<V: Linear>(
    degree: usize,
    knots: &[f64],
    span: usize,
    t: f64,
    window: &[V],
) -> V {
    let basis = basis_functions(degree, knots, span, t);

    let mut point = V::default();
    for (b, cp) in basis.iter().zip(window) {
        point += *cp * *b;
    }

    point
}

/// Evaluate the curve and its derivatives up to `order` at parameter `t`.
///
/// Returns `order + 1` values; entries past `degree` are zero. Applied to
/// homogeneous control points this yields derivatives in weighted space, which
/// [`super::rational::rational_derivatives`] turns into Cartesian ones.
#[allow(clippy::needless_range_loop)]
pub fn curve_derivatives<V: Linear>(
    degree: usize,
    knots: &[f64],
    control_points: &[V],
    t: f64,
    order: usize,
) -> Result<Vec<V>> {
    let n = check_layout(degree, knots, control_points.len())?;
    let span = find_span(degree, knots, n, t)?;
    Ok(span_derivatives(
        degree,
        knots,
        span,
        t,
        &control_points[span - degree..=span],
        order,
    ))
}

/// Derivatives up to `order` from the control points acting on `span`, laid out as in
/// [`span_point`].
///
/// # Panics
/// If `span` is not a valid span of `knots` or `window` is shorter than `degree + 1`.
#[allow(clippy::needless_range_loop)]
pub fn span_derivatives<V: Linear>(
    degree: usize,
    knots: &[f64],
    span: usize,
    t: f64,
    window: &[V],
    order: usize,
) -> Vec<V> {
    let du = order.min(degree);
    let nders = derivative_basis_functions(degree, knots, span, t, du);

    let mut derivs = vec![V::default(); order + 1];
    for k in 0..=du {
        for j in 0..=degree {
            derivs[k] += window[j] * nders[k][j];
        }
    }

    derivs
}

/// Evaluate a rational B-spline (NURBS) curve point at parameter `t`.
///
/// `homogeneous_points` are the weighted control points `(w * p, w)`.
pub fn rational_curve_point<P: ControlPoint>(
    degree: usize,
    knots: &[f64],
    homogeneous_points: &[P::Homogeneous],
    t: f64,
) -> Result<P> {
    let weighted = curve_point(degree, knots, homogeneous_points, t)?;
    dehomogenize(weighted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nurbs::homogeneous::homogenize;
    use knotwork_math::{DVec2, DVec3};

    #[test]
    fn test_curve_point_linear() {
        let degree = 1;
        let knots = vec![0.0, 0.0, 1.0, 2.0, 2.0];
        let cps = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
        ];

        let p = curve_point(degree, &knots, &cps, 0.5).unwrap();
        assert!((p.x - 0.5).abs() < 1e-10);
        assert!(p.y.abs() < 1e-10);

        let p = curve_point(degree, &knots, &cps, 1.5).unwrap();
        assert!((p.x - 1.0).abs() < 1e-10);
        assert!((p.y - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_curve_point_quadratic() {
        let degree = 2;
        let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let cps = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.5, 1.0),
            DVec2::new(1.0, 0.0),
        ];

        let p = curve_point(degree, &knots, &cps, 0.0).unwrap();
        assert!((p.x - 0.0).abs() < 1e-10);

        let p = curve_point(degree, &knots, &cps, 1.0).unwrap();
        assert!((p.x - 1.0).abs() < 1e-10);

        let p = curve_point(degree, &knots, &cps, 0.5).unwrap();
        assert!((p.x - 0.5).abs() < 1e-10);
        assert!((p.y - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_curve_point_rejects_bad_layout() {
        let cps = vec![DVec2::ZERO, DVec2::X];
        let err = curve_point(2, &[0.0, 0.0, 1.0, 1.0], &cps, 0.5).unwrap_err();
        assert!(matches!(err, KnotworkError::MalformedCurve(_)));

        let err = curve_point::<DVec2>(1, &[0.0, 1.0], &[], 0.5).unwrap_err();
        assert!(matches!(err, KnotworkError::MalformedCurve(_)));
    }

    #[test]
    fn test_curve_derivatives_cubic_bezier_start() {
        let knots = vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let cps = vec![
            DVec2::new(10.0, 0.0),
            DVec2::new(20.0, 10.0),
            DVec2::new(30.0, 20.0),
            DVec2::new(50.0, 50.0),
        ];

        let d = curve_derivatives(3, &knots, &cps, 0.0, 2).unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(d[0], DVec2::new(10.0, 0.0));
        // Bezier start tangent: 3 * (P1 - P0)
        assert!((d[1] - DVec2::new(30.0, 30.0)).length() < 1e-10);
        // Second derivative: 6 * (P2 - 2 P1 + P0)
        assert!((d[2] - DVec2::new(0.0, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_curve_point_with_repeated_end_knots() {
        // Start knot repeated degree + 2 times: the first span has zero width
        let knots = vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let cps = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(3.0, 0.0),
        ];

        let p = curve_point(2, &knots, &cps, 0.0).unwrap();
        assert_eq!(p, cps[1]);

        let d = curve_derivatives(2, &knots, &cps, 0.0, 2).unwrap();
        assert!(d.iter().all(|v| v.is_finite()));
        // Quadratic Bezier on cps[1..]: C'(0) = 2 (P2 - P1)
        assert!((d[1] - DVec2::new(2.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_huge_degree_rejected() {
        let cps = vec![DVec2::ZERO, DVec2::X];
        let err = curve_point(usize::MAX, &[0.0, 0.0, 1.0, 1.0], &cps, 0.5).unwrap_err();
        assert!(matches!(err, KnotworkError::MalformedCurve(_)));
    }

    #[test]
    fn test_span_point_matches_curve_point() {
        let knots = vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let cps = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 2.0, 0.0),
            DVec3::new(2.0, -1.0, 1.0),
            DVec3::new(3.0, 0.5, 2.0),
            DVec3::new(4.0, 0.0, 0.0),
        ];
        let t = 1.25;
        let span = find_span(2, &knots, 4, t).unwrap();
        let window = &cps[span - 2..=span];
        assert_eq!(
            span_point(2, &knots, span, t, window),
            curve_point(2, &knots, &cps, t).unwrap()
        );
        assert_eq!(
            span_derivatives(2, &knots, span, t, window, 3),
            curve_derivatives(2, &knots, &cps, t, 3).unwrap()
        );
    }

    #[test]
    fn test_curve_derivatives_beyond_degree() {
        let knots = vec![0.0, 0.0, 1.0, 1.0];
        let cps = vec![DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0)];
        let d = curve_derivatives(1, &knots, &cps, 0.25, 3).unwrap();
        assert_eq!(d.len(), 4);
        assert!((d[0] - DVec3::new(0.5, 0.0, 0.0)).length() < 1e-12);
        assert!((d[1] - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-12);
        assert_eq!(d[2], DVec3::ZERO);
        assert_eq!(d[3], DVec3::ZERO);
    }

    #[test]
    fn test_rational_curve_point_quarter_circle() {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let cps = vec![DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0), DVec2::new(0.0, 1.0)];
        let hom = homogenize(&cps, Some(&[1.0, w, 1.0][..])).unwrap();

        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let p: DVec2 = rational_curve_point(2, &knots, &hom, t).unwrap();
            assert!((p.length() - 1.0).abs() < 1e-12, "radius {} at t={}", p.length(), t);
        }
    }
}
