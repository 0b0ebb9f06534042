use std::path::PathBuf;

use c64_bitmap::{Container, Mode, PaletteChoice, PaletteName};
use clap::ValueEnum;

/// Picture format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Hires, saved as Art Studio
    Hires,
    ArtStudioHires,
    /// Multicolor, saved as Koala
    Multi,
    Koala,
}

impl OutputFormat {
    pub fn mode(self) -> Mode {
        match self {
            OutputFormat::Hires | OutputFormat::ArtStudioHires => Mode::Hires,
            OutputFormat::Multi | OutputFormat::Koala => Mode::Multicolor,
        }
    }

    /// Native single-file container of the format.
    pub fn container(self) -> Container {
        match self.mode() {
            Mode::Hires => Container::ArtStudio,
            Mode::Multicolor => Container::Koala,
        }
    }
}

/// What to do about color clashes (`--errors`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ErrorAction {
    /// Only log the clashes
    #[default]
    None,
    /// Show the error overlay in the image viewer
    Show,
    /// Save the error overlay next to the input as `<name>_error.png`
    Save,
    /// Save the error overlay and open both pictures in the editor
    Grafx2,
    /// Try to fix the clashes
    Fix,
}

/// Output packaging selected with `-x` / `-r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Packaging {
    /// The format's own container
    #[default]
    Native,
    Executable,
    Raw,
}

/// Everything that shapes the conversion of a batch.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    pub packaging: Packaging,
    pub output: Option<PathBuf>,
    pub border: Option<u8>,
    pub background: Option<u8>,
    pub errors: ErrorAction,
    pub palette: PaletteChoice,
    /// Write output even when clashes remain
    pub force: bool,
}

impl ConvertOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            packaging: Packaging::default(),
            output: None,
            border: None,
            background: None,
            errors: ErrorAction::default(),
            palette: PaletteChoice::default(),
            force: false,
        }
    }

    pub fn container(&self) -> Container {
        match self.packaging {
            Packaging::Native => self.format.container(),
            Packaging::Executable => Container::Executable,
            Packaging::Raw => Container::Raw,
        }
    }
}

/// Parse a palette name or `auto`.
pub fn parse_palette(s: &str) -> Result<PaletteChoice, String> {
    if s.trim().eq_ignore_ascii_case("auto") {
        return Ok(PaletteChoice::Auto);
    }
    s.parse::<PaletteName>().map(PaletteChoice::Fixed)
}

/// Parse a C64 color number (0-15).
pub fn parse_color(s: &str) -> Result<u8, String> {
    match s.trim().parse::<u8>() {
        Ok(n) if n < 16 => Ok(n),
        _ => Err(format!("`{s}` is not a color number (0-15)")),
    }
}
