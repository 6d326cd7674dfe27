use thiserror::Error;

pub type SpringResult<T> = Result<T, SpringError>;

#[derive(Debug, Error)]
pub enum SpringError {
    /// Construction-time parameter violation. Aborts only the offending node.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid viewport extent: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid viewport scale: sx={sx}, sy={sy}")]
    InvalidScale { sx: f64, sy: f64 },

    /// A composite unit referenced a sibling value that is absent (or cyclic)
    /// at resolution time. Aborts that render pass for the node.
    #[error("unresolved unit reference: {0}")]
    UnresolvedReference(String),

    /// `Disposed` is terminal; no further resolution is allowed.
    #[error("spring node has been disposed")]
    NodeDisposed,
}
