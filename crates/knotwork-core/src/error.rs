use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KnotworkError {
    #[error("Malformed curve: {0}")]
    MalformedCurve(String),

    #[error("Invalid knot vector: {0}")]
    InvalidKnotVector(String),

    #[error("Parameter {parameter} outside domain [{min}, {max}]")]
    ParameterOutOfDomain { parameter: f64, min: f64, max: f64 },

    #[error("Degenerate weight: cannot dehomogenize a point with weight {0}")]
    DegenerateWeight(f64),
}

pub type Result<T> = std::result::Result<T, KnotworkError>;
