use thiserror::Error;

/// Errors raised by the point mass forward model before any computation starts.
///
/// Numeric degeneracies (collocated observation and source points) are not errors, they
/// surface as non-finite values in the result.
#[derive(Debug, Error)]
pub enum GravityError {
    #[error("Gravity field {0} not recognized")]
    InvalidField(String),

    #[error("shapes {shapes:?} cannot be broadcast to a common shape")]
    ShapeMismatch { shapes: Vec<Vec<usize>> },

    #[error(
        "point mass arrays have mismatched lengths \
         (longitude {longitude}, latitude {latitude}, radius {radius}, mass {mass})"
    )]
    LengthMismatch {
        longitude: usize,
        latitude: usize,
        radius: usize,
        mass: usize,
    },

    #[error("at least one point mass is required")]
    NoPointMasses,

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
