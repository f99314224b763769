use thiserror::Error;

/// Top-level error type for the symsect analysis kernel.
#[derive(Debug, Error)]
pub enum SymsectError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Region(#[from] RegionError),
}

/// Errors related to boundary-element construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to regions and the region store.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("region not found in store")]
    NotFound,

    #[error("region has an empty boundary")]
    EmptyBoundary,
}

/// Convenience type alias for results using [`SymsectError`].
pub type Result<T> = std::result::Result<T, SymsectError>;
