//! Converter builder running the whole pipeline for one picture.

use crate::clash::{detect, ClashViolation};
use crate::color::SourceImage;
use crate::error::{ConvertError, GeometryError};
use crate::grid::{CharGrid, Mode};
use crate::mapper::PaletteMapper;
use crate::output::{encode, EncodedImage};
use crate::palette::{Palette, PaletteChoice, PALETTE_SIZE};
use crate::resolve::{
    ClashResolver, ClashStrategy, Diagnostic, ErrorOverlay, ExternalEditor, OverlaySink,
};

/// Picture converter.
///
/// Holds the options only; [`convert()`](Self::convert) takes `&self`, so
/// one converter serves a whole batch and images share no state.
///
/// # Example
///
/// ```
/// use c64_bitmap::{Converter, DiscardOverlay, Mode, NoEditor, Rgb, SourceImage};
///
/// let image = SourceImage::filled(320, 200, Rgb::new(0x35, 0x28, 0x79));
/// let conversion = Converter::new(Mode::Hires)
///     .convert(&image, &DiscardOverlay, &NoEditor)
///     .unwrap();
///
/// assert!(conversion.is_clean());
/// assert!(conversion.encoded.screen().iter().all(|&b| b == 0x66));
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    mode: Mode,
    palette: PaletteChoice,
    background: Option<u8>,
    border: Option<u8>,
    strategy: ClashStrategy,
}

impl Converter {
    /// Converter for `mode` with automatic palette, background and border
    /// colors, reporting clashes.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            palette: PaletteChoice::default(),
            background: None,
            border: None,
            strategy: ClashStrategy::default(),
        }
    }

    #[inline]
    pub fn palette(mut self, palette: PaletteChoice) -> Self {
        self.palette = palette;
        self
    }

    /// Picture background; `None` picks the most frequent color.
    #[inline]
    pub fn background(mut self, color: Option<u8>) -> Self {
        self.background = color;
        self
    }

    /// Border color; `None` picks the most frequent color.
    #[inline]
    pub fn border(mut self, color: Option<u8>) -> Self {
        self.border = color;
        self
    }

    #[inline]
    pub fn strategy(mut self, strategy: ClashStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Quantize, detect and resolve clashes, and encode `image`.
    ///
    /// The overlay strategies talk to `sink` and `editor`; their failures
    /// end up in [`Conversion::diagnostics`].
    ///
    /// # Errors
    ///
    /// [`ConvertError::Geometry`] when `image` is not the mode's size,
    /// [`ConvertError::InvalidColor`] for a background or border outside
    /// 0-15.
    pub fn convert(
        &self,
        image: &SourceImage,
        sink: &dyn OverlaySink,
        editor: &dyn ExternalEditor,
    ) -> Result<Conversion, ConvertError> {
        if image.width() != self.mode.width() || image.height() != self.mode.height() {
            return Err(GeometryError::Dimensions {
                mode: self.mode,
                width: image.width(),
                height: image.height(),
                expected_width: self.mode.width(),
                expected_height: self.mode.height(),
            }
            .into());
        }
        check_color("background", self.background)?;
        check_color("border", self.border)?;

        let palette = Palette::choose(self.palette, image.pixels());
        let quantized = PaletteMapper::new(palette).quantize(image);
        let most_frequent = quantized.most_frequent();
        let background = self.background.unwrap_or(most_frequent);
        let border = self.border.unwrap_or(most_frequent);

        let mut grid = CharGrid::partition(&quantized, self.mode, background)?;
        let violations: Vec<ClashViolation> = detect(&grid).collect();
        if !violations.is_empty() {
            tracing::info!(clashes = violations.len(), "Found color clashes");
        }

        let resolver = ClashResolver::new(palette, sink, editor);
        let resolution = resolver.resolve(&mut grid, violations, &self.strategy);
        let encoded = encode(&grid, &palette, border)?;

        Ok(Conversion {
            encoded,
            violations: resolution.remaining,
            diagnostics: resolution.diagnostics,
            overlay: resolution.overlay,
            palette,
        })
    }
}

fn check_color(role: &'static str, color: Option<u8>) -> Result<(), ConvertError> {
    match color {
        Some(index) if index as usize >= PALETTE_SIZE => Err(ConvertError::InvalidColor { role, index }),
        _ => Ok(()),
    }
}

/// Result of [`Converter::convert`].
///
/// `encoded` is always usable; whether to write it while `violations`
/// remain is the caller's decision.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub encoded: EncodedImage,
    /// Clashes left after resolving
    pub violations: Vec<ClashViolation>,
    pub diagnostics: Vec<Diagnostic>,
    pub overlay: Option<ErrorOverlay>,
    /// Palette the picture was quantized with
    pub palette: Palette,
}

impl Conversion {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
