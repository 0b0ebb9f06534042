//! File containers for encoded pictures.
//!
//! Every container starts with a little-endian load address except the raw
//! split files, which are bare memory dumps.

use std::fmt;

use super::EncodedImage;
use crate::error::ContainerError;
use crate::grid::Mode;

/// Output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// One file per buffer, no headers
    Raw,
    /// Koala Painter, multicolor only, loads at $6000
    Koala,
    /// Art Studio, hires only, loads at $2000
    ArtStudio,
    /// Self-displaying program, loads at $0801
    Executable,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Container::Raw => "raw",
            Container::Koala => "Koala",
            Container::ArtStudio => "Art Studio",
            Container::Executable => "executable",
        })
    }
}

/// One file of a serialized picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPart {
    /// Appended to the output stem; empty for single-file containers
    pub suffix: &'static str,
    pub bytes: Vec<u8>,
}

/// Size of an executable in either mode.
pub const PRG_SIZE: usize = 14145;

const KOALA_LOAD: u16 = 0x6000;
const ART_STUDIO_LOAD: u16 = 0x2000;
const PRG_LOAD: u16 = 0x0801;

const PRG_SCREEN: u16 = 0x0c00;
const PRG_COLOR_RAM: u16 = 0x1c00;
const PRG_BITMAP: u16 = 0x2000;

/// `10 SYS 2064`
const BASIC_HEADER: [u8; 15] = [
    0x01, 0x08, 0x0b, 0x08, 0x0a, 0x00, 0x9e, 0x32, 0x30, 0x36, 0x34, 0x00, 0x00, 0x00, 0x00,
];

const HIRES_BORDER_AT: usize = 19;
const HIRES_STUB: [u8; 41] = {
    let mut stub = [0u8; 41];
    let code: [u8; 24] = [
        0x78, // sei
        0xa9, 0x00, 0x8d, 0x20, 0xd0, // border
        0xa9, 0x00, 0x8d, 0x21, 0xd0, // background
        0xa9, 0xbb, 0x8d, 0x11, 0xd0, // bitmap mode on
        0xa9, 0x3c, 0x8d, 0x18, 0xd0, // screen $0c00, bitmap $2000
        0x4c, 0x25, 0x08, // jmp *
    ];
    let mut i = 0;
    while i < BASIC_HEADER.len() {
        stub[i] = BASIC_HEADER[i];
        i += 1;
    }
    // code starts at $0810
    let mut j = 0;
    while j < code.len() {
        stub[17 + j] = code[j];
        j += 1;
    }
    stub
};

const MULTI_BORDER_AT: usize = 33;
const MULTI_BACKGROUND_AT: usize = 38;
const MULTI_STUB: [u8; 74] = {
    let mut stub = [0u8; 74];
    let code: [u8; 57] = [
        0xa9, 0x38, 0x8d, 0x18, 0xd0, // screen $0c00, bitmap $2000
        0xa9, 0xd8, 0x8d, 0x16, 0xd0, // multicolor on
        0xa9, 0x3b, 0x8d, 0x11, 0xd0, // bitmap mode on
        0xa9, 0x00, 0x8d, 0x20, 0xd0, // border
        0xa9, 0x00, 0x8d, 0x21, 0xd0, // background
        0xa2, 0x00, // ldx #0
        0xbd, 0x00, 0x1c, 0x9d, 0x00, 0xd8, // copy color RAM
        0xbd, 0x00, 0x1d, 0x9d, 0x00, 0xd9, //
        0xbd, 0x00, 0x1e, 0x9d, 0x00, 0xda, //
        0xbd, 0x00, 0x1f, 0x9d, 0x00, 0xdb, //
        0xe8, 0xd0, 0xe5, // inx, bne
        0x4c, 0x46, 0x08, // jmp *
    ];
    let mut i = 0;
    while i < BASIC_HEADER.len() {
        stub[i] = BASIC_HEADER[i];
        i += 1;
    }
    let mut j = 0;
    while j < code.len() {
        stub[17 + j] = code[j];
        j += 1;
    }
    stub
};

/// Serialize `image` into the files of `container`.
///
/// # Errors
///
/// [`ContainerError::ModeMismatch`] for Koala with a hires picture and for
/// Art Studio with a multicolor one.
pub fn serialize(image: &EncodedImage, container: Container) -> Result<Vec<ContainerPart>, ContainerError> {
    let mismatch = || ContainerError::ModeMismatch {
        container,
        mode: image.mode(),
    };

    let parts = match (container, image.mode()) {
        (Container::Raw, _) => raw(image),
        (Container::Koala, Mode::Multicolor) => {
            let color_ram = image.color_ram().ok_or_else(mismatch)?;
            let mut bytes = load_address(KOALA_LOAD);
            bytes.extend_from_slice(image.bitmap());
            bytes.extend_from_slice(image.screen());
            bytes.extend_from_slice(color_ram);
            bytes.push(image.background());
            single(bytes)
        }
        (Container::ArtStudio, Mode::Hires) => {
            let mut bytes = load_address(ART_STUDIO_LOAD);
            bytes.extend_from_slice(image.bitmap());
            bytes.extend_from_slice(image.screen());
            single(bytes)
        }
        (Container::Executable, _) => single(executable(image)),
        (Container::Koala | Container::ArtStudio, _) => return Err(mismatch()),
    };

    tracing::debug!(%container, files = parts.len(), "Serialized picture");
    Ok(parts)
}

fn single(bytes: Vec<u8>) -> Vec<ContainerPart> {
    vec![ContainerPart { suffix: "", bytes }]
}

fn load_address(address: u16) -> Vec<u8> {
    address.to_le_bytes().to_vec()
}

fn raw(image: &EncodedImage) -> Vec<ContainerPart> {
    let mut parts = vec![
        ContainerPart {
            suffix: "_bitmap.raw",
            bytes: image.bitmap().to_vec(),
        },
        ContainerPart {
            suffix: "_screen.raw",
            bytes: image.screen().to_vec(),
        },
    ];
    if let Some(color_ram) = image.color_ram() {
        parts.push(ContainerPart {
            suffix: "_color-ram.raw",
            bytes: color_ram.to_vec(),
        });
        parts.push(ContainerPart {
            suffix: "_bg.raw",
            bytes: vec![image.background()],
        });
    }
    parts
}

/// Pad `bytes` with zeros up to the file offset of `address`.
fn pad_to(bytes: &mut Vec<u8>, address: u16) {
    let offset = (address - PRG_LOAD) as usize + 2;
    bytes.resize(offset, 0);
}

fn executable(image: &EncodedImage) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(PRG_SIZE);
    match image.color_ram() {
        Some(color_ram) => {
            bytes.extend_from_slice(&MULTI_STUB);
            bytes[MULTI_BORDER_AT] = image.border();
            bytes[MULTI_BACKGROUND_AT] = image.background();
            pad_to(&mut bytes, PRG_SCREEN);
            bytes.extend_from_slice(image.screen());
            pad_to(&mut bytes, PRG_COLOR_RAM);
            bytes.extend_from_slice(color_ram);
        }
        None => {
            bytes.extend_from_slice(&HIRES_STUB);
            bytes[HIRES_BORDER_AT] = image.border();
            pad_to(&mut bytes, PRG_SCREEN);
            bytes.extend_from_slice(image.screen());
        }
    }
    pad_to(&mut bytes, PRG_BITMAP);
    bytes.extend_from_slice(image.bitmap());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CharGrid, QuantizedGrid};
    use crate::output::{encode, BITMAP_SIZE, SCREEN_SIZE};
    use crate::palette::{Palette, PaletteName, BLUE, CYAN, RED};
    use pretty_assertions::assert_eq;

    fn encoded(mode: Mode) -> EncodedImage {
        let mut q = QuantizedGrid::filled(mode.width(), mode.height(), BLUE);
        q.set(0, 0, RED);
        let grid = CharGrid::partition(&q, mode, BLUE).unwrap();
        encode(&grid, &Palette::named(PaletteName::Pepto), CYAN).unwrap()
    }

    #[test]
    fn test_raw_parts() {
        let hires = serialize(&encoded(Mode::Hires), Container::Raw).unwrap();
        let suffixes: Vec<_> = hires.iter().map(|p| p.suffix).collect();
        assert_eq!(suffixes, vec!["_bitmap.raw", "_screen.raw"]);
        assert_eq!(hires[0].bytes.len(), BITMAP_SIZE);
        assert_eq!(hires[1].bytes.len(), SCREEN_SIZE);

        let multi = serialize(&encoded(Mode::Multicolor), Container::Raw).unwrap();
        let sizes: Vec<_> = multi.iter().map(|p| (p.suffix, p.bytes.len())).collect();
        assert_eq!(
            sizes,
            vec![
                ("_bitmap.raw", 8000),
                ("_screen.raw", 1000),
                ("_color-ram.raw", 1000),
                ("_bg.raw", 1)
            ]
        );
        assert_eq!(multi[3].bytes, vec![BLUE]);
    }

    #[test]
    fn test_koala_layout() {
        let image = encoded(Mode::Multicolor);
        let parts = serialize(&image, Container::Koala).unwrap();
        let bytes = &parts[0].bytes;

        assert_eq!(bytes.len(), 10003);
        assert_eq!(&bytes[..2], &[0x00, 0x60]);
        assert_eq!(&bytes[2..8002], image.bitmap());
        assert_eq!(&bytes[8002..9002], image.screen());
        assert_eq!(bytes[10002], BLUE);
    }

    #[test]
    fn test_art_studio_layout() {
        let image = encoded(Mode::Hires);
        let parts = serialize(&image, Container::ArtStudio).unwrap();
        assert_eq!(parts[0].bytes.len(), 9002);
        assert_eq!(&parts[0].bytes[..2], &[0x00, 0x20]);
        assert_eq!(parts[0].suffix, "");
    }

    #[test]
    fn test_mode_mismatch() {
        assert_eq!(
            serialize(&encoded(Mode::Hires), Container::Koala),
            Err(ContainerError::ModeMismatch {
                container: Container::Koala,
                mode: Mode::Hires
            })
        );
        assert!(serialize(&encoded(Mode::Multicolor), Container::ArtStudio).is_err());
    }

    #[test]
    fn test_hires_executable() {
        let image = encoded(Mode::Hires);
        let bytes = serialize(&image, Container::Executable).unwrap().remove(0).bytes;

        assert_eq!(bytes.len(), PRG_SIZE);
        assert_eq!(&bytes[..2], &[0x01, 0x08]);
        assert_eq!(&bytes[17..20], &[0x78, 0xa9, CYAN]);
        assert_eq!(&bytes[38..41], &[0x4c, 0x25, 0x08]);
        assert!(bytes[41..1025].iter().all(|&b| b == 0));
        assert_eq!(&bytes[1025..2025], image.screen());
        assert_eq!(&bytes[6145..], image.bitmap());
    }

    #[test]
    fn test_multicolor_executable() {
        let image = encoded(Mode::Multicolor);
        let bytes = serialize(&image, Container::Executable).unwrap().remove(0).bytes;

        assert_eq!(bytes.len(), PRG_SIZE);
        assert_eq!(bytes[MULTI_BORDER_AT], CYAN);
        assert_eq!(bytes[MULTI_BACKGROUND_AT], BLUE);
        assert_eq!(&bytes[71..74], &[0x4c, 0x46, 0x08]);
        assert_eq!(&bytes[1025..2025], image.screen());
        assert_eq!(&bytes[5121..6121], image.color_ram().unwrap());
        assert!(bytes[6121..6145].iter().all(|&b| b == 0));
        assert_eq!(&bytes[6145..], image.bitmap());
    }
}
