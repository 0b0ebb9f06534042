//! Source color types
//!
//! Decoded images arrive as 8-bit RGB pixels. [`Rgb`] is the pixel value and
//! [`SourceImage`] the row-major grid handed over by the decoding
//! collaborator.

mod rgb;
mod source;

pub use rgb::Rgb;
pub use source::SourceImage;
