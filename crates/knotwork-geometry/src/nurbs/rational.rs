//! Cartesian derivatives of rational curves.

use knotwork_core::{KnotworkError, Result};
use knotwork_math::ControlPoint;

/// Binomial coefficient `C(n, k)` as a float.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut c = 1.0;
    for i in 0..k {
        c = c * (n - i) as f64 / (i + 1) as f64;
    }
    c
}

/// Turn homogeneous-space derivatives into Cartesian derivatives.
///
/// `homogeneous_derivs[k]` is the `k`-th derivative of the weighted curve
/// `(A(t), w(t))`. With `C` the Cartesian curve,
///
/// ```text
/// C^(k) = (A^(k) - sum_{i=1..k} C(k,i) * w^(i) * C^(k-i)) / w^(0)
/// ```
pub fn rational_derivatives<P: ControlPoint>(
    homogeneous_derivs: &[P::Homogeneous],
) -> Result<Vec<P>> {
    let (a_ders, w_ders): (Vec<P>, Vec<f64>) = homogeneous_derivs
        .iter()
        .map(|&h| P::split_homogeneous(h))
        .unzip();

    let Some(&w0) = w_ders.first() else {
        return Ok(Vec::new());
    };
    if w0 == 0.0 {
        return Err(KnotworkError::DegenerateWeight(w0));
    }

    let mut ck: Vec<P> = Vec::with_capacity(a_ders.len());
    for (k, &a) in a_ders.iter().enumerate() {
        let mut v = a;
        for i in 1..=k {
            v -= ck[k - i] * (binomial(k, i) * w_ders[i]);
        }
        ck.push(v / w0);
    }

    Ok(ck)
}
