//! Encoded C64 memory buffers and their container formats.

mod container;
mod encoded_image;

pub use container::{serialize, Container, ContainerPart, PRG_SIZE};
pub use encoded_image::{encode, EncodedImage, BITMAP_SIZE, SCREEN_SIZE};
