use thiserror::Error;

/// Errors reported by geometric calculations
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Rigid-body fitting needs at least three point pairs
    #[error("at least 3 point pairs are required for a rigid fit, got {n_points}")]
    TooFewPoints { n_points: usize },
    /// Both point sets given to a rigid fit must have the same size
    #[error("point sets differ in size: {n_lhs} vs {n_rhs}")]
    PointCountMismatch { n_lhs: usize, n_rhs: usize },
    /// The SVD of the covariance matrix did not converge
    #[error("singular value decomposition failed during a rigid fit")]
    SvdFailed,
}
