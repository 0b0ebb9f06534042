//! Screen geometry, quantized pixel grids and char blocks.
//!
//! Both graphics modes cover the screen with 40×25 chars. A hires char is
//! 8×8 pixels at one bit per pixel; a multicolor char is 4×8 double-wide
//! pixels at two bits per pixel, so the multicolor pixel grid is 160×200.

mod char_block;
mod char_grid;
mod quantized;

use std::fmt;

pub use char_block::{Char, MAX_CHAR_PIXELS};
pub use char_grid::CharGrid;
pub use quantized::QuantizedGrid;

/// Chars per screen row.
pub const COLUMNS: usize = 40;
/// Char rows per screen.
pub const ROWS: usize = 25;
/// Chars per screen.
pub const CHAR_COUNT: usize = COLUMNS * ROWS;
/// Pixel rows per char in both modes.
pub const CHAR_HEIGHT: usize = 8;

/// Bitmap graphics mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// 320×200, two colors per 8×8 char
    Hires,
    /// 160×200, background plus three colors per 4×8 char
    Multicolor,
}

impl Mode {
    /// Pixel grid width.
    #[inline]
    pub fn width(self) -> usize {
        COLUMNS * self.char_width()
    }

    /// Pixel grid height.
    #[inline]
    pub fn height(self) -> usize {
        ROWS * CHAR_HEIGHT
    }

    /// Char width in mode pixels.
    #[inline]
    pub fn char_width(self) -> usize {
        match self {
            Mode::Hires => 8,
            Mode::Multicolor => 4,
        }
    }

    /// Maximum distinct colors in one char, shared background included.
    #[inline]
    pub fn max_colors(self) -> usize {
        match self {
            Mode::Hires => 2,
            Mode::Multicolor => 4,
        }
    }

    #[inline]
    pub fn bits_per_pixel(self) -> usize {
        match self {
            Mode::Hires => 1,
            Mode::Multicolor => 2,
        }
    }

    /// Screen pixels per mode pixel, horizontally.
    #[inline]
    pub fn pixel_scale_x(self) -> usize {
        match self {
            Mode::Hires => 1,
            Mode::Multicolor => 2,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Hires => f.write_str("hires"),
            Mode::Multicolor => f.write_str("multicolor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_geometry() {
        assert_eq!((Mode::Hires.width(), Mode::Hires.height()), (320, 200));
        assert_eq!(
            (Mode::Multicolor.width(), Mode::Multicolor.height()),
            (160, 200)
        );
        for mode in [Mode::Hires, Mode::Multicolor] {
            assert_eq!(mode.width() * mode.pixel_scale_x(), 320);
            assert_eq!(mode.char_width() * mode.bits_per_pixel(), 8);
        }
    }
}
