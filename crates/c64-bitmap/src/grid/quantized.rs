//! Grid of palette indices, one per mode pixel.

use crate::color::Rgb;
use crate::error::GeometryError;
use crate::palette::{Palette, PALETTE_SIZE};

/// Palette indices in row-major order.
///
/// Produced once by [`PaletteMapper`](crate::mapper::PaletteMapper) and
/// read-only afterwards; the autofix works on the chars and the grid is
/// rebuilt from them with [`CharGrid::to_quantized`](super::CharGrid::to_quantized).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedGrid {
    width: usize,
    height: usize,
    indices: Vec<u8>,
}

impl QuantizedGrid {
    /// Wrap palette indices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::PixelCount`] when `indices.len()` is not
    /// `width * height`, and [`GeometryError::ColorIndex`] for an index
    /// outside the palette.
    pub fn new(width: usize, height: usize, indices: Vec<u8>) -> Result<Self, GeometryError> {
        if indices.len() != width * height {
            return Err(GeometryError::PixelCount {
                expected: width * height,
                found: indices.len(),
            });
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= PALETTE_SIZE) {
            return Err(GeometryError::ColorIndex(bad));
        }
        Ok(Self {
            width,
            height,
            indices,
        })
    }

    /// Grid filled with one color.
    pub(crate) fn filled(width: usize, height: usize, index: u8) -> Self {
        Self {
            width,
            height,
            indices: vec![index; width * height],
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
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub(crate) fn indices_mut(&mut self) -> &mut [u8] {
        &mut self.indices
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.indices[y * self.width + x]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: usize, y: usize, index: u8) {
        self.indices[y * self.width + x] = index;
    }

    /// Pixel count per palette index.
    pub fn histogram(&self) -> [u32; PALETTE_SIZE] {
        let mut hist = [0u32; PALETTE_SIZE];
        for &idx in &self.indices {
            hist[idx as usize] += 1;
        }
        hist
    }

    /// Number of palette colors actually used.
    pub fn distinct_colors(&self) -> usize {
        self.histogram().iter().filter(|&&n| n > 0).count()
    }

    /// The most used palette index; ties go to the lowest index.
    ///
    /// Serves as the default background and border color.
    pub fn most_frequent(&self) -> u8 {
        let hist = self.histogram();
        let mut best = 0usize;
        for (i, &count) in hist.iter().enumerate() {
            if count > hist[best] {
                best = i;
            }
        }
        best as u8
    }

    /// Look every index up in `palette`.
    pub fn to_rgb(&self, palette: &Palette) -> Vec<Rgb> {
        self.indices.iter().map(|&i| palette.color(i)).collect()
    }
}
