//! Color clash detection.
//!
//! A char clashes when it needs more colors than its mode can address:
//! two per hires char, or the shared background plus three per multicolor
//! char. Detection is a pure scan; clashes are data, never errors.

use std::fmt;
use std::iter::FusedIterator;

use crate::grid::{Char, CharGrid, Mode};
use crate::palette::color_name;

/// Pixel-space rectangle, in mode pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Why a char cannot be encoded as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClashReason {
    /// More distinct colors than the mode allows per char
    TooManyColors { found: usize, max: usize },
    /// Multicolor char using four colors, none of them the background;
    /// only three per-char slots exist
    BackgroundUnavailable { background: u8 },
}

impl fmt::Display for ClashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClashReason::TooManyColors { found, max } => {
                write!(f, "{found} colors, at most {max} allowed")
            }
            ClashReason::BackgroundUnavailable { background } => {
                write!(
                    f,
                    "4 colors without background {}",
                    color_name(*background)
                )
            }
        }
    }
}

/// One clashing char.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClashViolation {
    /// Char column (0-based)
    pub col: usize,
    /// Char row (0-based)
    pub row: usize,
    /// The char's pixels, in mode pixel space
    pub bounds: PixelRect,
    /// Origin plus four in both directions, in mode pixel space
    pub near: (usize, usize),
    /// Every color found in the char, most frequent first
    pub colors: Vec<u8>,
    pub reason: ClashReason,
}

impl fmt::Display for ClashViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Too many colors per block in char {}, {} near x={}, y={} ({})",
            self.col + 1,
            self.row + 1,
            self.near.0,
            self.near.1,
            self.reason
        )
    }
}

/// Check a single char against the mode's color limit.
pub fn check_char(ch: &Char, mode: Mode, background: u8) -> Option<ClashViolation> {
    let distinct = ch.distinct();
    let max = mode.max_colors();

    let reason = match mode {
        Mode::Hires if distinct > max => ClashReason::TooManyColors {
            found: distinct,
            max,
        },
        Mode::Multicolor if distinct > max => ClashReason::TooManyColors {
            found: distinct,
            max,
        },
        Mode::Multicolor if distinct == max && !ch.contains(background) => {
            ClashReason::BackgroundUnavailable { background }
        }
        _ => return None,
    };

    let (x, y) = ch.origin();
    Some(ClashViolation {
        col: ch.col(),
        row: ch.row(),
        bounds: PixelRect {
            x,
            y,
            width: ch.width(),
            height: ch.height(),
        },
        near: ch.near(),
        colors: ch.colors_by_frequency(),
        reason,
    })
}

/// Lazily scan every char of `grid` for clashes.
///
/// The returned iterator holds no state beyond its position; call `detect`
/// again to rescan after the grid changed.
///
/// # Example
///
/// ```
/// use c64_bitmap::{detect, CharGrid, Mode, QuantizedGrid};
///
/// let grid = QuantizedGrid::new(320, 200, vec![6; 320 * 200]).unwrap();
/// let chars = CharGrid::partition(&grid, Mode::Hires, 6).unwrap();
/// assert_eq!(detect(&chars).count(), 0);
/// ```
pub fn detect(grid: &CharGrid) -> Violations<'_> {
    Violations { grid, next: 0 }
}

/// Iterator returned by [`detect`].
#[derive(Debug, Clone)]
pub struct Violations<'a> {
    grid: &'a CharGrid,
    next: usize,
}

impl Iterator for Violations<'_> {
    type Item = ClashViolation;

    fn next(&mut self) -> Option<Self::Item> {
        let chars = self.grid.chars();
        while self.next < chars.len() {
            let ch = &chars[self.next];
            self.next += 1;
            if let Some(violation) = check_char(ch, self.grid.mode(), self.grid.background()) {
                return Some(violation);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.grid.len() - self.next.min(self.grid.len())))
    }
}

impl FusedIterator for Violations<'_> {}
