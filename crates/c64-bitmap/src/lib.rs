#![allow(clippy::module_inception)]

//! c64-bitmap: convert pictures into C64 bitmap graphics
//!
//! The pipeline maps source pixels onto the fixed 16-color palette, splits
//! the picture into 40×25 chars, finds chars that need more colors than the
//! graphics mode can address (color clashes), optionally repairs them, and
//! encodes the result into C64 memory buffers and file containers.
//!
//! # Quick Start
//!
//! ```
//! use c64_bitmap::{serialize, Container, Converter, DiscardOverlay, Mode, NoEditor, Rgb, SourceImage};
//!
//! let image = SourceImage::filled(160, 200, Rgb::new(0, 0, 0));
//! let conversion = Converter::new(Mode::Multicolor)
//!     .convert(&image, &DiscardOverlay, &NoEditor)
//!     .unwrap();
//!
//! let koala = serialize(&conversion.encoded, Container::Koala).unwrap();
//! assert_eq!(koala[0].bytes.len(), 10003);
//! ```
//!
//! # Modes
//!
//! | Mode | Pixels | Char | Colors per char |
//! |------|--------|------|-----------------|
//! | [`Mode::Hires`] | 320×200 | 8×8 | 2 |
//! | [`Mode::Multicolor`] | 160×200 | 4×8 | background + 3 |
//!
//! # Clash handling
//!
//! Clashes are data ([`ClashViolation`]), never errors. A
//! [`ClashStrategy`] decides whether they are only reported, drawn into an
//! [`ErrorOverlay`] for display or storage, handed to an external editor,
//! or repaired in place. Display, storage and the editor are reached
//! through the [`OverlaySink`] and [`ExternalEditor`] traits; the crate
//! itself never writes files or starts processes.

pub mod api;
pub mod clash;
pub mod color;
pub mod error;
pub mod grid;
pub mod mapper;
pub mod output;
pub mod palette;
pub mod resolve;


pub use api::{Conversion, Converter};
pub use clash::{check_char, detect, ClashReason, ClashViolation, PixelRect};
pub use color::{Rgb, SourceImage};
pub use error::{ContainerError, ConvertError, EncodingPreconditionError, ExternalToolError, GeometryError};
pub use grid::{Char, CharGrid, Mode, QuantizedGrid};
pub use mapper::PaletteMapper;
pub use output::{encode, serialize, Container, ContainerPart, EncodedImage};
pub use palette::{color_name, Palette, PaletteChoice, PaletteName};
pub use resolve::{
    ClashResolver, ClashStrategy, Diagnostic, DiscardOverlay, ErrorOverlay, ExternalEditor, NoEditor,
    OverlaySink, Resolution, DEFAULT_REMAP_TOLERANCE,
};
