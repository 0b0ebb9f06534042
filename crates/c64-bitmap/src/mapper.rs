//! Nearest-color mapping of source pixels onto the fixed palette.

use std::collections::HashMap;

use crate::color::{Rgb, SourceImage};
use crate::grid::QuantizedGrid;
use crate::palette::Palette;

/// Maps source colors to palette indices, remembering colors already seen.
///
/// Natural images hold far fewer distinct colors than pixels, so every
/// distinct color is matched against the palette only once.
///
/// # Example
///
/// ```
/// use c64_bitmap::{Palette, PaletteMapper, PaletteName, Rgb};
///
/// let mut mapper = PaletteMapper::new(Palette::named(PaletteName::Pepto));
/// assert_eq!(mapper.map(Rgb::new(2, 1, 0)), 0);
/// assert_eq!(mapper.map(Rgb::new(250, 255, 250)), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteMapper {
    palette: Palette,
    cache: HashMap<Rgb, u8>,
}

impl PaletteMapper {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            cache: HashMap::new(),
        }
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index nearest to `color`.
    pub fn map(&mut self, color: Rgb) -> u8 {
        let palette = self.palette;
        *self
            .cache
            .entry(color)
            .or_insert_with(|| palette.find_nearest(color).0)
    }

    /// Quantize a whole image.
    pub fn quantize(&mut self, image: &SourceImage) -> QuantizedGrid {
        let mut grid = QuantizedGrid::filled(image.width(), image.height(), 0);
        for (slot, &color) in grid.indices_mut().iter_mut().zip(image.pixels()) {
            *slot = self.map(color);
        }

        let colors = grid.distinct_colors();
        if colors < 2 {
            tracing::warn!(colors, "Picture has fewer than 2 colors; result may be confusing");
        } else {
            tracing::info!(colors, source_colors = self.cache.len(), "Quantized picture");
        }

        grid
    }
}
