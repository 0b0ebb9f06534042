//! Test pictures.

use c64_bitmap::palette::{BLACK, BLUE, GRAY, LIGHT_GRAY, RED, WHITE};
use c64_bitmap::{Palette, PaletteName};
use image::{Rgb, RgbImage};

/// Pepto RGB of a color number.
pub fn pepto(index: u8) -> Rgb<u8> {
    Rgb(Palette::named(PaletteName::Pepto).color(index).to_bytes())
}

/// Picture painted by `color(x, y)` with Pepto colors.
pub fn picture(width: u32, height: u32, color: impl Fn(u32, u32) -> u8) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| pepto(color(x, y)))
}

/// Single-color picture.
pub fn flat(width: u32, height: u32, index: u8) -> RgbImage {
    picture(width, height, |_, _| index)
}

/// Hires picture whose first char holds white, black and red.
pub fn clashing_hires() -> RgbImage {
    picture(320, 200, |x, y| match (x, y) {
        (0, 0) => BLACK,
        (1, 0) => RED,
        _ => WHITE,
    })
}

/// Hires picture whose first char holds white, gray and light gray; the
/// two grays are close enough to merge.
pub fn mergeable_hires() -> RgbImage {
    picture(320, 200, |x, y| match (x, y) {
        (0..=3, 0..=3) => GRAY,
        (_, 7) if x < 8 => LIGHT_GRAY,
        _ => WHITE,
    })
}

/// Full-width multicolor picture: blue with a white stripe of double
/// pixels.
pub fn wide_multicolor() -> RgbImage {
    picture(320, 200, |x, _| if x / 2 == 20 { WHITE } else { BLUE })
}
