//! Error types for the conversion pipeline.
//!
//! Color clashes are not errors: they are reported as
//! [`ClashViolation`](crate::clash::ClashViolation) values. The types here
//! cover the structural faults that abort the conversion of one image and
//! the recoverable failures of external collaborators.

use thiserror::Error;

use crate::grid::Mode;
use crate::output::Container;

/// Input geometry does not match what the pipeline stage expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Pixel buffer length differs from `width * height`
    #[error("pixel buffer holds {found} pixels, expected {expected}")]
    PixelCount { expected: usize, found: usize },

    /// Image dimensions do not match the mode's fixed screen size
    #[error("wrong picture dimensions: {width}x{height} (expected {expected_width}x{expected_height} for {mode})")]
    Dimensions {
        mode: Mode,
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    /// A grid cell or the background names no palette entry
    #[error("color index {0} is outside the 16-color palette")]
    ColorIndex(u8),
}

/// The char grid handed to the encoder is not shaped for its mode.
///
/// The partitioner guarantees matching geometry, so this only fires when a
/// grid was assembled or mutated incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingPreconditionError {
    #[error("char grid holds {found} chars, expected {expected}")]
    CharCount { expected: usize, found: usize },

    #[error("char {col},{row} is {width} pixels wide, expected {expected} for {mode}")]
    CharWidth {
        col: usize,
        row: usize,
        width: usize,
        expected: usize,
        mode: Mode,
    },

    #[error("color index {0} is outside the 16-color palette")]
    ColorIndex(u8),
}

/// An external helper program (image viewer or editor) could not be used.
///
/// Always recoverable: the conversion result is still valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExternalToolError {
    #[error("external tool `{command}` not found")]
    NotFound { command: String },

    #[error("cannot launch `{command}`: {reason}")]
    Launch { command: String, reason: String },

    #[error("no external tool configured")]
    NotConfigured,
}

/// The encoded image cannot be stored in the requested container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("{container} container cannot hold a {mode} picture")]
    ModeMismatch { container: Container, mode: Mode },
}

/// Unified error for [`Converter::convert`](crate::api::Converter::convert).
///
/// Any of these stops the conversion of the current image only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("encoding precondition violated: {0}")]
    Encoding(#[from] EncodingPreconditionError),

    #[error("{role} color {index} is not a valid color number (0-15)")]
    InvalidColor { role: &'static str, index: u8 },
}
