pub mod config;
pub mod options;

pub use config::{AppConfig, AutofixConfig, OverlayConfig, ToolConfig, CONFIG_ENV};
pub use options::{parse_color, parse_palette, ConvertOptions, ErrorAction, OutputFormat, Packaging};
