//! Conversion between weighted control points and homogeneous coordinates.

use knotwork_core::{KnotworkError, Result};
use knotwork_math::ControlPoint;

/// Lift control points into homogeneous space: `(w * p, w)`.
///
/// Missing weights mean every weight is 1.
pub fn homogenize<P: ControlPoint>(
    control_points: &[P],
    weights: Option<&[f64]>,
) -> Result<Vec<P::Homogeneous>> {
    match weights {
        None => Ok(control_points
            .iter()
            .map(|p| p.to_homogeneous(1.0))
            .collect()),
        Some(weights) => {
            if weights.len() != control_points.len() {
                return Err(KnotworkError::MalformedCurve(format!(
                    "{} weights for {} control points",
                    weights.len(),
                    control_points.len()
                )));
            }
            Ok(control_points
                .iter()
                .zip(weights)
                .map(|(p, &w)| p.to_homogeneous(w))
                .collect())
        }
    }
}

/// The weight channel of each homogeneous point.
pub fn weights<P: ControlPoint>(homogeneous_points: &[P::Homogeneous]) -> Vec<f64> {
    homogeneous_points
        .iter()
        .map(|&h| P::split_homogeneous(h).1)
        .collect()
}

/// Project a homogeneous point back to Cartesian space by dividing out its weight.
pub fn dehomogenize<P: ControlPoint>(homogeneous_point: P::Homogeneous) -> Result<P> {
    let (point, w) = P::split_homogeneous(homogeneous_point);
    if w == 0.0 {
        return Err(KnotworkError::DegenerateWeight(w));
    }
    Ok(point / w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use knotwork_math::{DVec2, DVec3, DVec4};

    #[test]
    fn test_homogenize_with_weights() {
        let pts = vec![DVec3::new(1.0, 2.0, 3.0), DVec3::new(-1.0, 0.0, 4.0)];
        let h = homogenize(&pts, Some(&[2.0, 0.5][..])).unwrap();
        assert_eq!(h[0], DVec4::new(2.0, 4.0, 6.0, 2.0));
        assert_eq!(h[1], DVec4::new(-0.5, 0.0, 2.0, 0.5));
        assert_eq!(weights::<DVec3>(&h), vec![2.0, 0.5]);
    }

    #[test]
    fn test_homogenize_without_weights() {
        let pts = vec![DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0)];
        let h = homogenize(&pts, None).unwrap();
        assert_eq!(h, vec![DVec3::new(1.0, 0.0, 1.0), DVec3::new(1.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_homogenize_weight_count_mismatch() {
        let pts = vec![DVec2::ZERO, DVec2::X];
        let err = homogenize(&pts, Some(&[1.0][..])).unwrap_err();
        assert!(matches!(err, KnotworkError::MalformedCurve(_)));
    }

    #[test]
    fn test_dehomogenize_round_trip() {
        let p = DVec3::new(3.5, -2.0, 7.25);
        for &w in &[0.1, 1.0, 2.0, 13.0] {
            let back: DVec3 = dehomogenize(p.to_homogeneous(w)).unwrap();
            assert_relative_eq!(back, p, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_dehomogenize_zero_weight() {
        let err = dehomogenize::<DVec2>(DVec3::new(1.0, 1.0, 0.0)).unwrap_err();
        assert_eq!(err, KnotworkError::DegenerateWeight(0.0));
    }
}
