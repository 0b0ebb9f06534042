//! Palette tables and nearest-color matching.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 16;

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r, g, b)
}

const VICE: [Rgb; PALETTE_SIZE] = [
    rgb(0x00, 0x00, 0x00),
    rgb(0xff, 0xff, 0xff),
    rgb(0x9a, 0x53, 0x48),
    rgb(0x8c, 0xc9, 0xd1),
    rgb(0x9b, 0x5a, 0xbb),
    rgb(0x7b, 0xb7, 0x54),
    rgb(0x51, 0x42, 0xb1),
    rgb(0xd8, 0xe2, 0x84),
    rgb(0xa0, 0x72, 0x35),
    rgb(0x70, 0x5b, 0x00),
    rgb(0xc6, 0x89, 0x80),
    rgb(0x69, 0x69, 0x69),
    rgb(0x92, 0x92, 0x92),
    rgb(0xb9, 0xee, 0x99),
    rgb(0x8e, 0x82, 0xe1),
    rgb(0xb9, 0xb9, 0xb9),
];

const TIMANTHES: [Rgb; PALETTE_SIZE] = [
    rgb(0, 0, 0),
    rgb(213, 213, 213),
    rgb(114, 53, 44),
    rgb(101, 159, 166),
    rgb(115, 58, 145),
    rgb(86, 141, 53),
    rgb(46, 35, 125),
    rgb(174, 183, 94),
    rgb(119, 79, 30),
    rgb(75, 60, 0),
    rgb(156, 99, 90),
    rgb(71, 71, 71),
    rgb(107, 107, 107),
    rgb(143, 194, 113),
    rgb(103, 93, 182),
    rgb(143, 143, 143),
];

const UNKNOWN: [Rgb; PALETTE_SIZE] = [
    rgb(0x00, 0x00, 0x00),
    rgb(0xff, 0xff, 0xff),
    rgb(0x88, 0x00, 0x00),
    rgb(0xaa, 0xff, 0xee),
    rgb(0xcc, 0x44, 0xcc),
    rgb(0x00, 0xcc, 0x55),
    rgb(0x00, 0x00, 0xaa),
    rgb(0xee, 0xee, 0x77),
    rgb(0xdd, 0x88, 0x55),
    rgb(0x66, 0x44, 0x00),
    rgb(0xff, 0x77, 0x77),
    rgb(0x33, 0x33, 0x33),
    rgb(0x77, 0x77, 0x77),
    rgb(0xaa, 0xff, 0x66),
    rgb(0x00, 0x88, 0xff),
    rgb(0xbb, 0xbb, 0xbb),
];

const PEPTO: [Rgb; PALETTE_SIZE] = [
    rgb(0x00, 0x00, 0x00),
    rgb(0xff, 0xff, 0xff),
    rgb(0x68, 0x37, 0x2b),
    rgb(0x70, 0xa4, 0xb2),
    rgb(0x6f, 0x3d, 0x86),
    rgb(0x58, 0x8d, 0x43),
    rgb(0x35, 0x28, 0x79),
    rgb(0xb8, 0xc7, 0x6f),
    rgb(0x6f, 0x4f, 0x25),
    rgb(0x43, 0x39, 0x00),
    rgb(0x9a, 0x67, 0x59),
    rgb(0x44, 0x44, 0x44),
    rgb(0x6c, 0x6c, 0x6c),
    rgb(0x9a, 0xd2, 0x84),
    rgb(0x6c, 0x5e, 0xb5),
    rgb(0x95, 0x95, 0x95),
];

/// Known renditions of the C64 colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteName {
    /// Colors of the VICE emulator's default palette
    Vice,
    /// Colors used by the Timanthes paint program
    Timanthes,
    /// Saturated palette of unknown origin found in older tools
    Unknown,
    /// Philip "Pepto" Timmermann's measured palette
    #[default]
    Pepto,
}

impl PaletteName {
    /// All palettes, in the order auto-detection tries them.
    pub const ALL: [PaletteName; 4] = [
        PaletteName::Vice,
        PaletteName::Timanthes,
        PaletteName::Unknown,
        PaletteName::Pepto,
    ];

    fn table(self) -> &'static [Rgb; PALETTE_SIZE] {
        match self {
            PaletteName::Vice => &VICE,
            PaletteName::Timanthes => &TIMANTHES,
            PaletteName::Unknown => &UNKNOWN,
            PaletteName::Pepto => &PEPTO,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteName::Vice => "vice",
            PaletteName::Timanthes => "timanthes",
            PaletteName::Unknown => "unknown",
            PaletteName::Pepto => "pepto",
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown palette `{s}`"))
    }
}

/// How the converter picks its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteChoice {
    /// Pick the named palette that best matches the source colors
    #[default]
    Auto,
    /// Always use this palette
    Fixed(PaletteName),
}

/// One fixed 16-entry palette. Index = native color code.
///
/// The table is static and never mutated; a `Palette` is a cheap `Copy`
/// handle to it.
///
/// # Example
///
/// ```
/// use c64_bitmap::{Palette, PaletteName, Rgb};
///
/// let palette = Palette::named(PaletteName::Pepto);
/// assert_eq!(palette.color(1), Rgb::new(255, 255, 255));
/// assert_eq!(palette.find_nearest(Rgb::new(250, 250, 250)).0, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    name: PaletteName,
    colors: &'static [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::named(PaletteName::default())
    }
}

impl Palette {
    pub fn named(name: PaletteName) -> Self {
        Self {
            name,
            colors: name.table(),
        }
    }

    #[inline]
    pub fn name(&self) -> PaletteName {
        self.name
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        self.colors
    }

    /// Reference color of a native color code.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 16`.
    #[inline]
    pub fn color(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    /// Nearest palette entry to `color`.
    ///
    /// Returns `(index, squared distance)`. Ties go to the lowest index; an
    /// exact match stops the scan.
    pub fn find_nearest(&self, color: Rgb) -> (u8, u32) {
        let mut best_idx = 0u8;
        let mut best_dist = u32::MAX;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(entry);
            if dist == 0 {
                return (i as u8, 0);
            }
            if dist < best_dist {
                best_dist = dist;
                best_idx = i as u8;
            }
        }

        (best_idx, best_dist)
    }

    /// Nearest entry to palette color `index` among `candidates`.
    ///
    /// Uses the same metric as [`find_nearest`](Self::find_nearest) restricted
    /// to the candidate set. `index` itself is skipped. Ties go to the
    /// candidate listed first. Returns `None` for an empty candidate set.
    pub fn nearest_among(&self, index: u8, candidates: &[u8]) -> Option<(u8, u32)> {
        let color = self.color(index);
        let mut best: Option<(u8, u32)> = None;

        for &candidate in candidates.iter().filter(|&&c| c != index) {
            let dist = color.distance_squared(self.color(candidate));
            match best {
                Some((_, best_dist)) if best_dist <= dist => {}
                _ => best = Some((candidate, dist)),
            }
        }

        best
    }

    /// Total matching error of a set of source colors against this palette.
    ///
    /// Each distinct color contributes its distance to the nearest entry.
    pub fn match_quality<I>(&self, colors: I) -> u64
    where
        I: IntoIterator<Item = Rgb>,
    {
        colors
            .into_iter()
            .map(|c| self.find_nearest(c).1 as u64)
            .sum()
    }

    /// Resolve a [`PaletteChoice`] for a set of source pixels.
    ///
    /// `Auto` scores every named palette by [`match_quality`](Self::match_quality)
    /// over the distinct source colors and keeps the lowest score; earlier
    /// palettes in [`PaletteName::ALL`] win ties.
    pub fn choose(choice: PaletteChoice, pixels: &[Rgb]) -> Palette {
        let name = match choice {
            PaletteChoice::Fixed(name) => return Palette::named(name),
            PaletteChoice::Auto => {
                let distinct: HashSet<Rgb> = pixels.iter().copied().collect();
                let mut best = (PaletteName::ALL[0], u64::MAX);
                for name in PaletteName::ALL {
                    let quality = Palette::named(name).match_quality(distinct.iter().copied());
                    if quality < best.1 {
                        best = (name, quality);
                    }
                }

                if best.1 == 0 {
                    tracing::info!(palette = %best.0, "Perfect palette match");
                } else {
                    tracing::info!(palette = %best.0, quality = best.1, "Selected closest palette");
                }
                best.0
            }
        };
        Palette::named(name)
    }
}
