//! Native C64 color codes and their names.

pub const BLACK: u8 = 0;
pub const WHITE: u8 = 1;
pub const RED: u8 = 2;
pub const CYAN: u8 = 3;
pub const PURPLE: u8 = 4;
pub const GREEN: u8 = 5;
pub const BLUE: u8 = 6;
pub const YELLOW: u8 = 7;
pub const ORANGE: u8 = 8;
pub const BROWN: u8 = 9;
pub const PINK: u8 = 10;
pub const DARK_GRAY: u8 = 11;
pub const GRAY: u8 = 12;
pub const LIGHT_GREEN: u8 = 13;
pub const LIGHT_BLUE: u8 = 14;
pub const LIGHT_GRAY: u8 = 15;

const COLOR_NAMES: [&str; 16] = [
    "Black",
    "White",
    "Red",
    "Cyan",
    "Purple",
    "Green",
    "Dark blue",
    "Yellow",
    "Orange",
    "Brown",
    "Pink",
    "Dark gray",
    "Gray",
    "Light green",
    "Light blue",
    "Light gray",
];

/// Human readable name of a color code, `"Unknown"` outside 0..16.
pub fn color_name(index: u8) -> &'static str {
    COLOR_NAMES
        .get(index as usize)
        .copied()
        .unwrap_or("Unknown")
}
