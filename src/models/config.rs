use c64_bitmap::{PaletteChoice, DEFAULT_REMAP_TOLERANCE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::parse_palette;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "IMAGE2C64_CONFIG";

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Palette name (`auto`, `vice`, `timanthes`, `unknown`, `pepto`)
    pub palette: Option<String>,

    pub autofix: AutofixConfig,

    /// Editor for `--errors grafx2`
    #[serde(default = "default_editor")]
    pub editor: ToolConfig,

    /// Image viewer for `--errors show`
    #[serde(default = "default_viewer")]
    pub viewer: ToolConfig,

    pub overlay: OverlayConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AutofixConfig {
    /// Largest squared RGB distance for merging colors
    pub tolerance: u32,
}

impl Default for AutofixConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_REMAP_TOLERANCE,
        }
    }
}

/// An external program; the file arguments are appended to `args`
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolConfig {
    fn named(command: &str) -> Self {
        Self {
            command: command.to_string(),
            args: Vec::new(),
        }
    }
}

fn default_editor() -> ToolConfig {
    ToolConfig::named("grafx2")
}

fn default_viewer() -> ToolConfig {
    ToolConfig::named("xdg-open")
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OverlayConfig {
    /// Enlargement factor of the displayed overlay
    pub scale: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { scale: 2 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            palette: None,
            autofix: AutofixConfig::default(),
            editor: default_editor(),
            viewer: default_viewer(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the file named by
    /// [`CONFIG_ENV`]. Without either, or on any error, the defaults apply.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => PathBuf::from(path),
                None => return Self::default(),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Configured palette; unknown names fall back to automatic selection.
    pub fn palette_choice(&self) -> PaletteChoice {
        match self.palette.as_deref().map(parse_palette) {
            Some(Ok(choice)) => choice,
            Some(Err(e)) => {
                tracing::warn!(%e, "Invalid palette in config, using auto");
                PaletteChoice::Auto
            }
            None => PaletteChoice::Auto,
        }
    }
}
