use thiserror::Error;

/// Errors raised by the strict parsing entry points.
///
/// Mesh generation itself never fails; unknown identifiers fall back to the
/// rectangular cuboid. These errors are only produced when a caller asks for
/// validation, e.g. the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrismError {
    #[error("unknown prism type `{0}` (expected one of: triangular, rectangular, pentagonal, hexagonal, octagonal)")]
    UnknownPrism(String),

    #[error("unknown rotation clock `{0}` (expected `per-frame` or `elapsed`)")]
    UnknownRotationClock(String),
}

pub type Result<T> = std::result::Result<T, PrismError>;
