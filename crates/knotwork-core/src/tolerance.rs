/// Tolerances shared by every evaluation routine.
///
/// These are fixed per process: evaluation routines read [`Tolerance::DEFAULT`]
/// rather than taking a tolerance argument.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Slack applied when comparing a parameter against knot values
    pub knot: f64,
    /// Linear tolerance for distance comparisons (in model units)
    pub linear: f64,
}

impl Tolerance {
    pub const KNOT_EPSILON: f64 = 1e-10;
    pub const DEFAULT_LINEAR: f64 = 1e-7;

    pub const DEFAULT: Self = Self {
        knot: Self::KNOT_EPSILON,
        linear: Self::DEFAULT_LINEAR,
    };

    /// Check if two parameter values are equal within knot tolerance
    pub fn knot_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.knot
    }

    /// Check if a value is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
