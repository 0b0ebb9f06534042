//! External viewer and editor processes.

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard, PoisonError};

use c64_bitmap::{ErrorOverlay, ExternalEditor, ExternalToolError, OverlaySink};
use tempfile::TempPath;

use crate::error::RenderError;
use crate::models::ToolConfig;
use crate::rendering::encode_overlay;

/// Start `tool` with `files` appended to its arguments and return at once.
///
/// The caller owns the returned child and must reap it.
pub fn spawn(tool: &ToolConfig, files: &[&Path]) -> Result<Child, ExternalToolError> {
    if tool.command.trim().is_empty() {
        return Err(ExternalToolError::NotConfigured);
    }

    let child = Command::new(&tool.command)
        .args(&tool.args)
        .args(files)
        .stdin(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ExternalToolError::NotFound {
                command: tool.command.clone(),
            },
            _ => ExternalToolError::Launch {
                command: tool.command.clone(),
                reason: e.to_string(),
            },
        })?;

    tracing::debug!(pid = child.id(), command = %tool.command, "Started external tool");
    Ok(child)
}

/// Children started during a run.
///
/// Finished children are reaped whenever a new one is tracked; the rest are
/// waited for on drop.
#[derive(Debug, Default)]
struct Launched {
    children: Mutex<Vec<Child>>,
}

impl Launched {
    fn lock(&self) -> MutexGuard<'_, Vec<Child>> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn track(&self, child: Child) {
        let mut children = self.lock();
        children.retain_mut(|c| !matches!(c.try_wait(), Ok(Some(_))));
        children.push(child);
    }

    #[cfg(test)]
    fn running(&self) -> usize {
        self.lock().len()
    }
}

impl Drop for Launched {
    fn drop(&mut self) {
        for mut child in self.lock().drain(..) {
            if let Err(e) = child.wait() {
                tracing::warn!(pid = child.id(), "Cannot wait for external tool: {e}");
            }
        }
    }
}

fn write_overlay(overlay: &ErrorOverlay, path: &Path) -> Result<(), RenderError> {
    let bytes = encode_overlay(overlay)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Writes overlays as PNG files and shows them with an image viewer.
///
/// Shown overlays go to temporary files that are deleted when the sink is
/// dropped, after every viewer it started has exited.
#[derive(Debug)]
pub struct FileOverlaySink {
    viewer: ToolConfig,
    scale: usize,
    // field order: viewers are waited for before their files go away
    launched: Launched,
    scratch: Mutex<Vec<TempPath>>,
}

impl FileOverlaySink {
    pub fn new(viewer: ToolConfig, scale: usize) -> Self {
        Self {
            viewer,
            scale,
            launched: Launched::default(),
            scratch: Mutex::new(Vec::new()),
        }
    }

    fn scratch_file(&self) -> std::io::Result<TempPath> {
        Ok(tempfile::Builder::new()
            .prefix("image2c64-")
            .suffix("_error.png")
            .tempfile()?
            .into_temp_path())
    }

    fn launch_error(&self, reason: impl ToString) -> ExternalToolError {
        ExternalToolError::Launch {
            command: self.viewer.command.clone(),
            reason: reason.to_string(),
        }
    }
}

impl OverlaySink for FileOverlaySink {
    fn show(&self, overlay: &ErrorOverlay) -> Result<(), ExternalToolError> {
        if self.viewer.command.trim().is_empty() {
            return Err(ExternalToolError::NotConfigured);
        }
        let path = self.scratch_file().map_err(|e| self.launch_error(e))?;
        write_overlay(&overlay.scaled(self.scale), &path).map_err(|e| self.launch_error(e))?;

        let child = spawn(&self.viewer, &[&path])?;
        self.launched.track(child);
        self.scratch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path);
        Ok(())
    }

    fn persist(&self, overlay: &ErrorOverlay, path: &Path) -> std::io::Result<()> {
        write_overlay(overlay, path).map_err(|e| match e {
            RenderError::Io(e) => e,
            RenderError::PngEncode(msg) => std::io::Error::other(msg),
        })?;
        tracing::info!("Saved error overlay to `{}'", path.display());
        Ok(())
    }
}

/// Opens the original and the error overlay in an image editor.
///
/// Editors still open when the value is dropped are waited for.
#[derive(Debug)]
pub struct CommandEditor {
    tool: ToolConfig,
    launched: Launched,
}

impl CommandEditor {
    pub fn new(tool: ToolConfig) -> Self {
        Self {
            tool,
            launched: Launched::default(),
        }
    }
}

impl ExternalEditor for CommandEditor {
    fn launch(&self, original: &Path, error_image: &Path) -> Result<(), ExternalToolError> {
        let child = spawn(&self.tool, &[original, error_image])?;
        self.launched.track(child);
        Ok(())
    }
}
