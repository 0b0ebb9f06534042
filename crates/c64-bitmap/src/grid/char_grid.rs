//! Flat 40×25 storage of chars and the block partitioner.

use super::{Char, Mode, QuantizedGrid, CHAR_COUNT, CHAR_HEIGHT, COLUMNS, ROWS};
use crate::error::GeometryError;
use crate::palette::PALETTE_SIZE;

/// All chars of one picture, row-major, plus the picture-wide background.
///
/// The shape is fixed by the mode at creation time; chars are addressed by
/// `(col, row)` or by their flat index `row * 40 + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharGrid {
    mode: Mode,
    background: u8,
    chars: Vec<Char>,
}

impl CharGrid {
    /// Split a quantized grid into chars.
    ///
    /// `background` is the picture-wide shared color. Multicolor chars always
    /// have it available; hires ignores it for clash purposes.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Dimensions`] if the grid is not exactly
    /// `mode.width() × mode.height()`, and [`GeometryError::ColorIndex`] if
    /// `background` is not a palette index.
    pub fn partition(
        grid: &QuantizedGrid,
        mode: Mode,
        background: u8,
    ) -> Result<Self, GeometryError> {
        if grid.width() != mode.width() || grid.height() != mode.height() {
            return Err(GeometryError::Dimensions {
                mode,
                width: grid.width(),
                height: grid.height(),
                expected_width: mode.width(),
                expected_height: mode.height(),
            });
        }
        if background as usize >= PALETTE_SIZE {
            return Err(GeometryError::ColorIndex(background));
        }

        let char_width = mode.char_width();
        let mut chars = Vec::with_capacity(CHAR_COUNT);
        let mut pixels = Vec::with_capacity(char_width * CHAR_HEIGHT);

        for row in 0..ROWS {
            for col in 0..COLUMNS {
                pixels.clear();
                for y in 0..CHAR_HEIGHT {
                    for x in 0..char_width {
                        pixels.push(grid.get(col * char_width + x, row * CHAR_HEIGHT + y));
                    }
                }
                chars.push(Char::new(col, row, char_width, &pixels));
            }
        }

        tracing::debug!(%mode, chars = chars.len(), "Partitioned picture into chars");

        Ok(Self {
            mode,
            background,
            chars,
        })
    }

    /// Assemble a grid from prebuilt chars without shape checks.
    ///
    /// The encoder validates the shape; this exists for callers that build
    /// chars themselves.
    pub fn from_chars(mode: Mode, background: u8, chars: Vec<Char>) -> Self {
        Self {
            mode,
            background,
            chars,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn background(&self) -> u8 {
        self.background
    }

    #[inline]
    pub fn chars(&self) -> &[Char] {
        &self.chars
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Char at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the 40×25 grid.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> &Char {
        &self.chars[row * COLUMNS + col]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, col: usize, row: usize) -> &mut Char {
        &mut self.chars[row * COLUMNS + col]
    }

    /// Reassemble the pixel grid from the chars.
    pub fn to_quantized(&self) -> QuantizedGrid {
        let mut grid = QuantizedGrid::filled(self.mode.width(), self.mode.height(), 0);
        for ch in &self.chars {
            let (ox, oy) = ch.origin();
            for y in 0..ch.height() {
                for x in 0..ch.width() {
                    grid.set(ox + x, oy + y, ch.pixel(x, y));
                }
            }
        }
        grid
    }
}
