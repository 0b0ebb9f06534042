//! A single encoding block.

use super::CHAR_HEIGHT;
use crate::palette::PALETTE_SIZE;

/// Pixel capacity of the largest char (hires 8×8).
pub const MAX_CHAR_PIXELS: usize = 64;

/// One 8×8 (hires) or 4×8 (multicolor) block of palette indices.
///
/// Pixels are stored inline so a [`CharGrid`](super::CharGrid) is a single
/// flat allocation. The color histogram is kept in sync with the pixels and
/// is the multiset the clash detector and autofix work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Char {
    col: usize,
    row: usize,
    width: usize,
    pixels: [u8; MAX_CHAR_PIXELS],
    histogram: [u16; PALETTE_SIZE],
}

impl Char {
    /// Build a char from `width * 8` row-major palette indices.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * 8`, `width > 8` or a pixel is not
    /// a palette index.
    pub fn new(col: usize, row: usize, width: usize, pixels: &[u8]) -> Self {
        assert!(width * CHAR_HEIGHT <= MAX_CHAR_PIXELS, "char too wide: {width}");
        assert_eq!(pixels.len(), width * CHAR_HEIGHT, "char pixel count");

        let mut stored = [0u8; MAX_CHAR_PIXELS];
        stored[..pixels.len()].copy_from_slice(pixels);

        let mut histogram = [0u16; PALETTE_SIZE];
        for &p in pixels {
            assert!((p as usize) < PALETTE_SIZE, "color index {p} outside palette");
            histogram[p as usize] += 1;
        }

        Self {
            col,
            row,
            width,
            pixels: stored,
            histogram,
        }
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Width in mode pixels (8 hires, 4 multicolor).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        CHAR_HEIGHT
    }

    /// Row-major pixels of this char.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..self.width * CHAR_HEIGHT]
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Top-left corner in mode pixel space.
    #[inline]
    pub fn origin(&self) -> (usize, usize) {
        (self.col * self.width, self.row * CHAR_HEIGHT)
    }

    /// Point reported in clash messages: the origin offset by half a hires
    /// char in both directions, in mode pixel space.
    #[inline]
    pub fn near(&self) -> (usize, usize) {
        let (x, y) = self.origin();
        (x + 4, y + 4)
    }

    #[inline]
    pub fn count(&self, color: u8) -> u16 {
        self.histogram[color as usize]
    }

    #[inline]
    pub fn contains(&self, color: u8) -> bool {
        self.count(color) > 0
    }

    /// Number of distinct colors in the char.
    pub fn distinct(&self) -> usize {
        self.histogram.iter().filter(|&&n| n > 0).count()
    }

    /// Colors present, most frequent first; equal counts by lowest index.
    pub fn colors_by_frequency(&self) -> Vec<u8> {
        let mut colors: Vec<u8> = (0..PALETTE_SIZE as u8)
            .filter(|&c| self.contains(c))
            .collect();
        colors.sort_by(|&a, &b| self.count(b).cmp(&self.count(a)).then(a.cmp(&b)));
        colors
    }

    /// Repaint every pixel of color `from` with `to`.
    ///
    /// Returns the number of pixels changed.
    pub(crate) fn replace_color(&mut self, from: u8, to: u8) -> usize {
        if from == to {
            return 0;
        }
        let len = self.width * CHAR_HEIGHT;
        let mut changed = 0;
        for p in self.pixels[..len].iter_mut().filter(|p| **p == from) {
            *p = to;
            changed += 1;
        }
        self.histogram[to as usize] += self.histogram[from as usize];
        self.histogram[from as usize] = 0;
        changed
    }
}
