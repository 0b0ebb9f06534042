pub mod overlay_png;

pub use overlay_png::encode_overlay;
