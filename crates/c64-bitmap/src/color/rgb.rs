//! 8-bit RGB pixel type

use std::fmt;

/// A pixel color with 8-bit channels, as read from the decoded image.
///
/// Values are immutable once read; the converter only ever compares them
/// against palette reference colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// This is the only metric used by the converter: palette matching and
    /// the clash autofix both rank candidates by it. The maximum value is
    /// `3 * 255^2 = 195075`.
    ///
    /// # Example
    /// ```
    /// use c64_bitmap::Rgb;
    /// let black = Rgb::new(0, 0, 0);
    /// let white = Rgb::new(255, 255, 255);
    /// assert_eq!(black.distance_squared(white), 195_075);
    /// assert_eq!(white.distance_squared(white), 0);
    /// ```
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Linear blend towards `other`; `amount` 0.0 keeps `self`, 1.0 gives `other`.
    pub fn blend(self, other: Rgb, amount: f32) -> Rgb {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (a as f32 + (b as f32 - a as f32) * amount)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let a = Rgb::new(0x68, 0x37, 0x2b);
        let b = Rgb::new(0x9a, 0x67, 0x59);
        assert_eq!(a.distance_squared(b), b.distance_squared(a));
        assert_eq!(a.distance_squared(b), 50 * 50 + 48 * 48 + 46 * 46);
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Rgb::new(0xab, 0x01, 0xff).to_string(), "#ab01ff");
    }

    #[test]
    fn test_blend_endpoints() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        assert_eq!(red.blend(blue, 0.0), red);
        assert_eq!(red.blend(blue, 1.0), blue);
        assert_eq!(red.blend(blue, 0.5), Rgb::new(128, 0, 128));
    }
}
