use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Construction-time validation is the only fatal failure mode; everything
/// after a successful `Simulation::new` is closed-form arithmetic over
/// pre-validated data. Numerical pathologies during collision resolution
/// (coincident centers) are handled locally per pair and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction parameter (non-positive temperature, N < 2,
    /// non-positive dt, degenerate species constants).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument to a post-construction API call.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}
