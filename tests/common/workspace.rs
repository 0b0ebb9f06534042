//! Scratch directory with recording stand-ins for the viewer and editor.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use c64_bitmap::{
    ErrorOverlay, ExternalEditor, ExternalToolError, OverlaySink, PaletteChoice, PaletteName,
};
use image::RgbImage;
use image2c64::models::{AppConfig, ConvertOptions, OutputFormat};
use image2c64::services::BatchConverter;
use tempfile::TempDir;

/// What the stand-in tools were asked to do.
#[derive(Debug, Default)]
pub struct Recorded {
    pub shown: usize,
    pub saved: Vec<PathBuf>,
    pub launched: Vec<(PathBuf, PathBuf)>,
}

struct RecordingSink(Arc<Mutex<Recorded>>);

impl OverlaySink for RecordingSink {
    fn show(&self, _overlay: &ErrorOverlay) -> Result<(), ExternalToolError> {
        self.0.lock().unwrap().shown += 1;
        Ok(())
    }

    fn persist(&self, _overlay: &ErrorOverlay, path: &Path) -> std::io::Result<()> {
        self.0.lock().unwrap().saved.push(path.to_path_buf());
        Ok(())
    }
}

struct RecordingEditor(Arc<Mutex<Recorded>>);

impl ExternalEditor for RecordingEditor {
    fn launch(&self, original: &Path, error_image: &Path) -> Result<(), ExternalToolError> {
        self.0
            .lock()
            .unwrap()
            .launched
            .push((original.to_path_buf(), error_image.to_path_buf()));
        Ok(())
    }
}

pub struct TestWorkspace {
    dir: TempDir,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
            recorded: Arc::default(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Save `img` as `name` and return its path.
    pub fn picture(&self, name: &str, img: &RgbImage) -> PathBuf {
        let path = self.path(name);
        img.save(&path).expect("Failed to save test picture");
        path
    }

    /// Options with the Pepto palette fixed, so colors are predictable.
    pub fn options(&self, format: OutputFormat) -> ConvertOptions {
        let mut options = ConvertOptions::new(format);
        options.palette = PaletteChoice::Fixed(PaletteName::Pepto);
        options
    }

    /// Converter with recording viewer and editor.
    pub fn converter(&self, options: ConvertOptions) -> BatchConverter {
        BatchConverter::with_tools(
            options,
            &AppConfig::default(),
            Box::new(RecordingSink(self.recorded.clone())),
            Box::new(RecordingEditor(self.recorded.clone())),
        )
    }

    /// Converter with the real file sink and the tools from `config`.
    pub fn converter_with_config(&self, options: ConvertOptions, config: &AppConfig) -> BatchConverter {
        BatchConverter::new(options, config)
    }
}
