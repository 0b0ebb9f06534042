//! PNG encoding of error overlays.

use std::io::Cursor;

use c64_bitmap::ErrorOverlay;

use crate::error::RenderError;

/// Encode an overlay as an 8-bit RGB PNG.
pub fn encode_overlay(overlay: &ErrorOverlay) -> Result<Vec<u8>, RenderError> {
    encode_png(
        overlay.width() as u32,
        overlay.height() as u32,
        &overlay.to_rgb8(),
    )
}

fn encode_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
