//! Decoding input pictures into source pixels.

use std::path::Path;

use c64_bitmap::{Mode, SourceImage};
use image::imageops::FilterType;

use crate::error::AppError;

/// Decode `path` into RGB pixels for `mode`.
///
/// Multicolor accepts full-width 320×200 pictures and halves them
/// horizontally. Other sizes are passed through unchanged; the converter
/// rejects them.
pub fn load_source(path: &Path, mode: Mode) -> Result<SourceImage, AppError> {
    let decoded = image::open(path).map_err(|source| AppError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rgb = decoded.to_rgb8();
    tracing::debug!(width = rgb.width(), height = rgb.height(), "Decoded {}", path.display());

    let full_width = (mode.width() * mode.pixel_scale_x()) as u32;
    if mode == Mode::Multicolor && rgb.width() == full_width && rgb.height() == mode.height() as u32 {
        tracing::debug!("Scaling picture down to {}x{}", mode.width(), mode.height());
        rgb = image::imageops::resize(&rgb, mode.width() as u32, mode.height() as u32, FilterType::Nearest);
    }

    SourceImage::from_rgb8(rgb.width() as usize, rgb.height() as usize, rgb.as_raw()).map_err(|e| {
        AppError::Convert {
            path: path.to_path_buf(),
            source: e.into(),
        }
    })
}
