//! The encoder and its output buffers.

use crate::error::EncodingPreconditionError;
use crate::grid::{Char, CharGrid, Mode, QuantizedGrid, CHAR_COUNT, CHAR_HEIGHT, COLUMNS};
use crate::palette::{Palette, PALETTE_SIZE};

/// Bitmap bytes: 1000 chars × 8 bytes.
pub const BITMAP_SIZE: usize = CHAR_COUNT * CHAR_HEIGHT;
/// Screen RAM (and color RAM) bytes: one per char.
pub const SCREEN_SIZE: usize = CHAR_COUNT;

/// C64 memory image of one picture.
///
/// The bitmap is char-sequential: the eight bytes of char 0, then char 1,
/// up to char 999, with the leftmost pixel in the most significant bit(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mode: Mode,
    background: u8,
    border: u8,
    bitmap: Vec<u8>,
    screen: Vec<u8>,
    color_ram: Option<Vec<u8>>,
}

impl EncodedImage {
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn background(&self) -> u8 {
        self.background
    }

    #[inline]
    pub fn border(&self) -> u8 {
        self.border
    }

    /// 8000 bytes.
    #[inline]
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// 1000 bytes.
    #[inline]
    pub fn screen(&self) -> &[u8] {
        &self.screen
    }

    /// 1000 bytes in multicolor mode, `None` in hires.
    #[inline]
    pub fn color_ram(&self) -> Option<&[u8]> {
        self.color_ram.as_deref()
    }

    /// Rebuild the palette indices the buffers describe.
    ///
    /// For a clash-free grid this is exactly the grid that was encoded.
    pub fn decode(&self) -> QuantizedGrid {
        let mut grid = QuantizedGrid::filled(self.mode.width(), self.mode.height(), self.background);
        let char_width = self.mode.char_width();
        let bits = self.mode.bits_per_pixel();
        let mask = (1u8 << bits) - 1;

        for index in 0..CHAR_COUNT {
            let (col, row) = (index % COLUMNS, index / COLUMNS);
            let slots = self.slots(index);
            for y in 0..CHAR_HEIGHT {
                let byte = self.bitmap[index * CHAR_HEIGHT + y];
                for x in 0..char_width {
                    let shift = 8 - bits * (x + 1);
                    let value = (byte >> shift) & mask;
                    grid.set(
                        col * char_width + x,
                        row * CHAR_HEIGHT + y,
                        slots[value as usize],
                    );
                }
            }
        }
        grid
    }

    /// Color of each bit value for char `index`.
    fn slots(&self, index: usize) -> [u8; 4] {
        let screen = self.screen[index];
        match (self.mode, &self.color_ram) {
            (Mode::Multicolor, Some(color_ram)) => [
                self.background,
                screen >> 4,
                screen & 0x0f,
                color_ram[index] & 0x0f,
            ],
            _ => [screen & 0x0f, screen >> 4, 0, 0],
        }
    }
}

/// Encode a char grid into C64 memory buffers.
///
/// Clashing chars are still encoded: a pixel whose color got no slot is
/// written as the nearest slot color in `palette`.
///
/// # Errors
///
/// [`EncodingPreconditionError`] when the grid does not hold 1000 chars of
/// the mode's width, or when a color number is outside the palette.
pub fn encode(
    grid: &CharGrid,
    palette: &Palette,
    border: u8,
) -> Result<EncodedImage, EncodingPreconditionError> {
    check_grid(grid, border)?;

    let mode = grid.mode();
    let background = grid.background();
    let mut bitmap = Vec::with_capacity(BITMAP_SIZE);
    let mut screen = Vec::with_capacity(SCREEN_SIZE);
    let mut color_ram = match mode {
        Mode::Multicolor => Some(Vec::with_capacity(SCREEN_SIZE)),
        Mode::Hires => None,
    };

    for ch in grid.chars() {
        let slots = match mode {
            Mode::Hires => hires_slots(ch),
            Mode::Multicolor => multicolor_slots(ch, background),
        };
        let used = &slots[..1 << mode.bits_per_pixel()];

        match mode {
            Mode::Hires => screen.push(slots[1] << 4 | slots[0]),
            Mode::Multicolor => {
                screen.push(slots[1] << 4 | slots[2]);
                if let Some(color_ram) = color_ram.as_mut() {
                    color_ram.push(slots[3]);
                }
            }
        }

        let bits = mode.bits_per_pixel();
        for y in 0..CHAR_HEIGHT {
            let mut byte = 0u8;
            for x in 0..ch.width() {
                let value = slot_value(ch.pixel(x, y), used, palette);
                byte |= value << (8 - bits * (x + 1));
            }
            bitmap.push(byte);
        }
    }

    tracing::debug!(%mode, background, border, "Encoded bitmap");

    Ok(EncodedImage {
        mode,
        background,
        border,
        bitmap,
        screen,
        color_ram,
    })
}

fn check_grid(grid: &CharGrid, border: u8) -> Result<(), EncodingPreconditionError> {
    if grid.len() != CHAR_COUNT {
        return Err(EncodingPreconditionError::CharCount {
            expected: CHAR_COUNT,
            found: grid.len(),
        });
    }
    for color in [grid.background(), border] {
        if color as usize >= PALETTE_SIZE {
            return Err(EncodingPreconditionError::ColorIndex(color));
        }
    }

    let expected = grid.mode().char_width();
    for ch in grid.chars() {
        if ch.width() != expected {
            return Err(EncodingPreconditionError::CharWidth {
                col: ch.col(),
                row: ch.row(),
                width: ch.width(),
                expected,
                mode: grid.mode(),
            });
        }
    }
    Ok(())
}

/// `[bit 0, bit 1, -, -]`: most frequent color first.
fn hires_slots(ch: &Char) -> [u8; 4] {
    let colors = ch.colors_by_frequency();
    let first = colors.first().copied().unwrap_or(0);
    let second = colors.get(1).copied().unwrap_or(first);
    [first, second, first, first]
}

/// `[00, 01, 10, 11]`: background, then the other colors by frequency.
fn multicolor_slots(ch: &Char, background: u8) -> [u8; 4] {
    let mut slots = [background; 4];
    for (slot, color) in slots[1..]
        .iter_mut()
        .zip(ch.colors_by_frequency().into_iter().filter(|&c| c != background))
    {
        *slot = color;
    }
    slots
}

fn slot_value(color: u8, slots: &[u8], palette: &Palette) -> u8 {
    if let Some(pos) = slots.iter().position(|&s| s == color) {
        return pos as u8;
    }
    let target = palette.color(color);
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (pos, &slot) in slots.iter().enumerate() {
        let dist = target.distance_squared(palette.color(slot));
        if dist < best_dist {
            best = pos;
            best_dist = dist;
        }
    }
    best as u8
}
