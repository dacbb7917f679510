// src/error.rs

use thiserror::Error;

/// Invalid layout parameters. Fatal to the render call that hit it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("gutter must lie in [0, 0.5), got {0}")]
    InvalidGutter(f64),
    #[error("padding must be non-negative, got {0}")]
    InvalidPadding(f64),
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

/// Malformed clip input. The intersection engine treats it as an empty
/// result rather than an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {vertices}")]
    Degenerate { vertices: usize },
    #[error("clip polygon is not convex")]
    NotConvex,
}
