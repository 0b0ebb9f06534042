//! Converting a list of input files.

use std::path::{Path, PathBuf};

use c64_bitmap::{
    serialize, ClashStrategy, Conversion, Converter, ExternalEditor, OverlaySink,
};

use super::loader::load_source;
use super::naming::{error_image_path, output_path, part_path, prepare_output_dir};
use super::tools::{CommandEditor, FileOverlaySink};
use crate::error::AppError;
use crate::models::{AppConfig, ConvertOptions, ErrorAction};

/// Converts input files one by one; a failed file does not stop the batch.
pub struct BatchConverter {
    options: ConvertOptions,
    converter: Converter,
    tolerance: u32,
    sink: Box<dyn OverlaySink>,
    editor: Box<dyn ExternalEditor>,
}

impl BatchConverter {
    /// Converter using the viewer and editor from `config`.
    pub fn new(options: ConvertOptions, config: &AppConfig) -> Self {
        let sink = FileOverlaySink::new(config.viewer.clone(), config.overlay.scale);
        let editor = CommandEditor::new(config.editor.clone());
        Self::with_tools(options, config, Box::new(sink), Box::new(editor))
    }

    pub fn with_tools(
        options: ConvertOptions,
        config: &AppConfig,
        sink: Box<dyn OverlaySink>,
        editor: Box<dyn ExternalEditor>,
    ) -> Self {
        let converter = Converter::new(options.format.mode())
            .palette(options.palette)
            .background(options.background)
            .border(options.border);
        Self {
            options,
            converter,
            tolerance: config.autofix.tolerance,
            sink,
            editor,
        }
    }

    /// Convert every input and return the number that failed.
    ///
    /// # Errors
    ///
    /// Only when the batch output directory cannot be used.
    pub fn run(&self, inputs: &[PathBuf]) -> Result<usize, AppError> {
        let batch = inputs.len() > 1;
        if let (true, Some(dir)) = (batch, self.options.output.as_deref()) {
            prepare_output_dir(dir)?;
        }

        let mut failed = 0;
        for input in inputs {
            let output = output_path(input, self.options.output.as_deref(), batch, self.options.packaging);
            match self.convert_file(input, &output) {
                Ok(written) => {
                    tracing::info!(files = written.len(), "Converted `{}'", input.display());
                }
                Err(e) => {
                    tracing::error!("{e}");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            tracing::warn!(failed, total = inputs.len(), "Some pictures were not converted");
        }
        Ok(failed)
    }

    /// Convert `input` and write its container files based on `output`.
    ///
    /// Returns the paths written.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<Vec<PathBuf>, AppError> {
        let mode = self.options.format.mode();
        let source = load_source(input, mode)?;

        let conversion = self
            .converter
            .clone()
            .strategy(self.strategy(input))
            .convert(&source, self.sink.as_ref(), self.editor.as_ref())
            .map_err(|source| AppError::Convert {
                path: input.to_path_buf(),
                source,
            })?;

        report(&conversion);
        if !conversion.is_clean() {
            if !self.options.force {
                return Err(AppError::Clashes {
                    path: input.to_path_buf(),
                    count: conversion.violations.len(),
                });
            }
            tracing::warn!(
                clashes = conversion.violations.len(),
                "Writing `{}' despite color clashes",
                input.display()
            );
        }

        let container = self.options.container();
        let parts = serialize(&conversion.encoded, container)?;

        let mut written = Vec::with_capacity(parts.len());
        for part in parts {
            let path = part_path(output, part.suffix);
            if path.exists() {
                tracing::warn!("File `{}' will be overwritten", path.display());
            }
            std::fs::write(&path, &part.bytes).map_err(|source| AppError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(bytes = part.bytes.len(), %container, "Wrote `{}'", path.display());
            written.push(path);
        }
        Ok(written)
    }

    fn strategy(&self, input: &Path) -> ClashStrategy {
        match self.options.errors {
            ErrorAction::None => ClashStrategy::Report,
            ErrorAction::Show => ClashStrategy::Visualize,
            ErrorAction::Save => ClashStrategy::Persist {
                path: error_image_path(input),
            },
            ErrorAction::Grafx2 => ClashStrategy::Externalize {
                original: input.to_path_buf(),
                error_image: error_image_path(input),
            },
            ErrorAction::Fix => ClashStrategy::Autofix {
                tolerance: self.tolerance,
            },
        }
    }
}

fn report(conversion: &Conversion) {
    tracing::debug!(palette = %conversion.palette.name(), "Palette used");
    for diagnostic in &conversion.diagnostics {
        if diagnostic.is_warning() {
            tracing::warn!("{diagnostic}");
        } else {
            tracing::debug!("{diagnostic}");
        }
    }
    for violation in &conversion.violations {
        tracing::error!("{violation}");
    }
}
