use thiserror::Error;

/// Construction errors raised by the kinematics types.
///
/// Numerical failures (singular inverses, overflow) are not represented here;
/// they propagate as non-finite values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("barycenter requires at least one point")]
    EmptyBarycenter,
    #[error("trajectory capacity must be positive")]
    ZeroCapacity,
    #[error("time step dt must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("state count mismatch: expected {expected}, got {actual}")]
    StateCountMismatch { expected: usize, actual: usize },
}
