//! Collaborator ports for the overlay strategies.

use std::path::Path;

use super::ErrorOverlay;
use crate::error::ExternalToolError;

/// Displays or stores error overlays.
pub trait OverlaySink {
    /// Show the overlay to the user. Must not block on the viewer.
    fn show(&self, overlay: &ErrorOverlay) -> Result<(), ExternalToolError>;

    /// Write the overlay as an image file at `path`.
    fn persist(&self, overlay: &ErrorOverlay, path: &Path) -> std::io::Result<()>;
}

/// Opens the source picture and its error overlay in an image editor.
pub trait ExternalEditor {
    /// Start the editor and return without waiting for it to exit.
    fn launch(&self, original: &Path, error_image: &Path) -> Result<(), ExternalToolError>;
}

/// Sink that drops every overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardOverlay;

impl OverlaySink for DiscardOverlay {
    fn show(&self, _overlay: &ErrorOverlay) -> Result<(), ExternalToolError> {
        Err(ExternalToolError::NotConfigured)
    }

    fn persist(&self, _overlay: &ErrorOverlay, path: &Path) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("no overlay storage configured for {}", path.display()),
        ))
    }
}

/// Editor port used when no editor is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEditor;

impl ExternalEditor for NoEditor {
    fn launch(&self, _original: &Path, _error_image: &Path) -> Result<(), ExternalToolError> {
        Err(ExternalToolError::NotConfigured)
    }
}
