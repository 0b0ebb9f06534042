//! The fixed 16-color C64 palette
//!
//! Color indices are the machine's native color codes. Several measured
//! renditions of the same 16 colors are in circulation; [`PaletteName`]
//! selects one and [`PaletteChoice::Auto`] picks the one closest to the
//! source image.

mod colors;
mod palette;

pub use colors::{
    color_name, BLACK, BLUE, BROWN, CYAN, DARK_GRAY, GRAY, GREEN, LIGHT_BLUE, LIGHT_GRAY,
    LIGHT_GREEN, ORANGE, PINK, PURPLE, RED, WHITE, YELLOW,
};
pub use palette::{Palette, PaletteChoice, PaletteName, PALETTE_SIZE};
