//! High-level entry point: the [`Converter`] builder.

mod converter;

pub use converter::{Conversion, Converter};
