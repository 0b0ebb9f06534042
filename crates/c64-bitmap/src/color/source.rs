//! Decoded source image handed over by the image-decoding collaborator.

use super::Rgb;
use crate::error::GeometryError;

/// A decoded pixel grid in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl SourceImage {
    /// Wrap decoded pixels.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::PixelCount`] when `pixels.len()` is not
    /// `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, GeometryError> {
        if pixels.len() != width * height {
            return Err(GeometryError::PixelCount {
                expected: width * height,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from packed `[R, G, B, R, G, B, ...]` bytes.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, GeometryError> {
        let pixels = bytes
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Image filled with one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Overwrite the pixel at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.pixels[y * self.width + x] = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count_mismatch() {
        let result = SourceImage::new(2, 2, vec![Rgb::default(); 3]);
        assert!(matches!(
            result,
            Err(GeometryError::PixelCount {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_from_rgb8_layout() {
        let bytes = [1, 2, 3, 4, 5, 6];
        let image = SourceImage::from_rgb8(2, 1, &bytes).unwrap();
        assert_eq!(image.get(0, 0), Rgb::new(1, 2, 3));
        assert_eq!(image.get(1, 0), Rgb::new(4, 5, 6));
    }

    #[test]
    fn test_set_and_get() {
        let mut image = SourceImage::filled(3, 2, Rgb::new(0, 0, 0));
        image.set(2, 1, Rgb::new(9, 9, 9));
        assert_eq!(image.get(2, 1), Rgb::new(9, 9, 9));
        assert_eq!(image.pixels()[5], Rgb::new(9, 9, 9));
    }
}
