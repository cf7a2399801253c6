#[derive(thiserror::Error, Debug)]
pub enum LweCryptoError {
    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, q) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Error when a square matrix (or a Gram matrix) is singular mod q.
    ///
    /// Randomly chosen row subsets hit this frequently; callers running a
    /// subset search treat it as a recoverable skip, not a failure.
    #[error("LinearDependence: {0}")]
    LinearDependence(String),
    /// Error when creating a field with an invalid modulus (q <= 2).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),
    /// The voting search exhausted every row subset without a single
    /// solvable subsystem.
    #[error("NoSolutionFound: {0}")]
    NoSolutionFound(String),
    #[error("InternalError: {0}")]
    InternalError(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
