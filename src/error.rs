//! Error types for the controller and its configuration.

/// Errors produced by controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The operation needs an engine, but no surface has been attached.
    #[error("{op}: no surface is attached")]
    Unbound { op: &'static str },
    /// A zoom value that is NaN, infinite, or not strictly positive.
    #[error("zoom must be a positive finite number, got {0}")]
    NonFiniteZoom(f64),
    /// A pan offset with a NaN or infinite coordinate.
    #[error("pan must be finite, got ({x}, {y})")]
    NonFinitePan { x: f64, y: f64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors produced while building a [`crate::config::ViewConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Parse { var: &'static str, value: String },
    /// Values parsed but are inconsistent with each other.
    #[error("invalid view config: {0}")]
    Invalid(String),
}
