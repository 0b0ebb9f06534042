//! image2c64 - convert pictures to C64 bitmap graphics
//!
//! Command line driver around the `c64-bitmap` engine: image loading,
//! output naming, overlay viewing and the external editor hand-off.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
