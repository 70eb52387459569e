use thiserror::Error;

/// Error types for knee detection
#[derive(Debug, Error)]
pub enum KneedleError {
    /// x and y must have the same number of samples
    #[error("Length mismatch: {x} x values but {y} y values")]
    LengthMismatch { x: usize, y: usize },

    /// Not enough samples for the requested operation
    #[error("Insufficient data: {len} points. Need at least {required} points")]
    InsufficientData { len: usize, required: usize },

    /// A sample is NaN or infinite
    #[error("Non-finite sample at index {index}")]
    NonFiniteInput { index: usize },

    /// x values must be strictly ascending
    #[error("x values are not strictly ascending at index {index}")]
    UnsortedInput { index: usize },

    /// Sensitivity must be a finite number
    #[error("Invalid sensitivity: {0}. Sensitivity must be finite")]
    InvalidSensitivity(f64),

    /// Mathematical computation error (e.g., singular spline system)
    #[error("Computation error: {0}")]
    ComputationError(String),

    /// Requested CSV column does not exist
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for knee detection operations
pub type Result<T> = std::result::Result<T, KneedleError>;
