//! Error types for chamfermatch.

use crate::shape::Shape;
use thiserror::Error;

/// Result alias for chamfermatch operations.
pub type ChamferMatchResult<T> = std::result::Result<T, ChamferMatchError>;

/// Errors that can occur when building tables, templates, or catalogs.
#[derive(Debug, Error, PartialEq)]
pub enum ChamferMatchError {
    /// The image dimensions are unusable.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidImage { width: usize, height: usize },
    /// The row stride is smaller than the image width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer does not cover the declared dimensions.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A template failed validation at construction time.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// No template exists for the shape in the requested catalog.
    #[error("no template for {shape} at interline {interline}")]
    UnknownShape { shape: Shape, interline: u32 },
    /// An image file could not be loaded or decoded.
    #[cfg(feature = "image-io")]
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
