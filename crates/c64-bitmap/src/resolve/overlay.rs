//! Error overlay rendering.

use crate::clash::ClashViolation;
use crate::color::Rgb;
use crate::grid::{Mode, QuantizedGrid};
use crate::palette::Palette;

/// Outline color for clashing chars.
pub const OUTLINE_COLOR: Rgb = Rgb::new(0xff, 0x00, 0x00);
/// How strongly the outline covers the picture underneath.
pub const OUTLINE_OPACITY: f32 = 0.65;

/// The quantized picture at screen resolution with every clashing char
/// outlined.
///
/// Always 320×200 in both modes; multicolor pixels are doubled
/// horizontally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorOverlay {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl ErrorOverlay {
    /// Render `grid` through `palette` and outline `violations`.
    pub fn render(
        grid: &QuantizedGrid,
        mode: Mode,
        palette: &Palette,
        violations: &[ClashViolation],
    ) -> Self {
        let scale = mode.pixel_scale_x();
        let width = grid.width() * scale;
        let height = grid.height();

        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(palette.color(grid.get(x / scale, y)));
            }
        }

        let mut overlay = Self {
            width,
            height,
            pixels,
        };
        for violation in violations {
            let b = violation.bounds;
            overlay.outline(b.x * scale, b.y, b.width * scale, b.height);
        }
        overlay
    }

    fn outline(&mut self, x0: usize, y0: usize, w: usize, h: usize) {
        if w == 0 || h == 0 {
            return;
        }
        let x1 = (x0 + w - 1).min(self.width - 1);
        let y1 = (y0 + h - 1).min(self.height - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                if x == x0 || x == x1 || y == y0 || y == y1 {
                    let p = &mut self.pixels[y * self.width + x];
                    *p = p.blend(OUTLINE_COLOR, OUTLINE_OPACITY);
                }
            }
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

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Packed RGB bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// Nearest-neighbour enlargement by an integer factor (at least 1).
    pub fn scaled(&self, factor: usize) -> ErrorOverlay {
        let factor = factor.max(1);
        if factor == 1 {
            return self.clone();
        }
        let width = self.width * factor;
        let height = self.height * factor;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(self.get(x / factor, y / factor));
            }
        }
        ErrorOverlay {
            width,
            height,
            pixels,
        }
    }
}
