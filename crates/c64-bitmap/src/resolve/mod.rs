//! What to do about color clashes.
//!
//! [`ClashResolver`] applies one [`ClashStrategy`] to the violations found
//! by [`detect`](crate::clash::detect). Only [`ClashStrategy::Autofix`]
//! touches the char grid; every other strategy leaves the picture alone and
//! hands the clashes back for the caller to report.
//!
//! Displaying or saving the error overlay and launching an editor go
//! through the [`OverlaySink`] and [`ExternalEditor`] ports, so the core
//! never spawns processes or writes files itself.

mod autofix;
mod diagnostic;
mod overlay;
mod ports;

use std::path::{Path, PathBuf};

use crate::clash::{detect, ClashViolation};
use crate::grid::CharGrid;
use crate::palette::Palette;

pub use diagnostic::Diagnostic;
pub use overlay::{ErrorOverlay, OUTLINE_COLOR, OUTLINE_OPACITY};
pub use ports::{DiscardOverlay, ExternalEditor, NoEditor, OverlaySink};

/// Largest squared RGB distance at which autofix merges an excess color
/// into one already used by the char.
///
/// Roughly 63 levels on every channel. Colors farther apart fall back to
/// the background.
pub const DEFAULT_REMAP_TOLERANCE: u32 = 12_000;

/// Clash handling strategy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClashStrategy {
    /// Return the clashes for textual reporting
    #[default]
    Report,
    /// Render the error overlay and hand it to the overlay sink for display
    Visualize,
    /// Render the error overlay and save it to `path`
    Persist { path: PathBuf },
    /// Save the overlay to `error_image`, then open it together with
    /// `original` in the external editor without waiting for it
    Externalize {
        original: PathBuf,
        error_image: PathBuf,
    },
    /// Remap excess colors in place
    Autofix {
        /// See [`DEFAULT_REMAP_TOLERANCE`]
        tolerance: u32,
    },
}

impl ClashStrategy {
    /// Autofix with the default tolerance.
    pub fn autofix() -> Self {
        ClashStrategy::Autofix {
            tolerance: DEFAULT_REMAP_TOLERANCE,
        }
    }
}

/// Outcome of [`ClashResolver::resolve`].
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Clashes still present in the grid
    pub remaining: Vec<ClashViolation>,
    /// The error overlay, for strategies that render one
    pub overlay: Option<ErrorOverlay>,
    /// Warnings and notes collected while resolving
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// True when no clash is left.
    pub fn is_clean(&self) -> bool {
        self.remaining.is_empty()
    }
}

static DISCARD: DiscardOverlay = DiscardOverlay;
static NO_EDITOR: NoEditor = NoEditor;

/// Applies a [`ClashStrategy`] to a char grid.
pub struct ClashResolver<'a> {
    palette: Palette,
    sink: &'a dyn OverlaySink,
    editor: &'a dyn ExternalEditor,
}

impl ClashResolver<'static> {
    /// A resolver without display, storage or editor collaborators.
    ///
    /// `Report` and `Autofix` behave normally. The overlay strategies still
    /// return the rendered overlay, and the failed display or save shows up
    /// as a diagnostic.
    pub fn detached(palette: Palette) -> Self {
        Self {
            palette,
            sink: &DISCARD,
            editor: &NO_EDITOR,
        }
    }
}

impl<'a> ClashResolver<'a> {
    pub fn new(palette: Palette, sink: &'a dyn OverlaySink, editor: &'a dyn ExternalEditor) -> Self {
        Self {
            palette,
            sink,
            editor,
        }
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Handle `violations` found in `grid` according to `strategy`.
    ///
    /// Never fails: collaborator failures end up in
    /// [`Resolution::diagnostics`]. After an autofix the grid is scanned
    /// again and `remaining` holds the result of that scan.
    pub fn resolve(
        &self,
        grid: &mut CharGrid,
        violations: Vec<ClashViolation>,
        strategy: &ClashStrategy,
    ) -> Resolution {
        let mut resolution = Resolution::default();
        if violations.is_empty() {
            return resolution;
        }

        match strategy {
            ClashStrategy::Report => {
                resolution.remaining = violations;
            }
            ClashStrategy::Visualize => {
                let overlay = self.render(grid, &violations);
                if let Err(e) = self.sink.show(&overlay) {
                    resolution.diagnostics.push(Diagnostic::OverlayNotShown(e));
                }
                resolution.overlay = Some(overlay);
                resolution.remaining = violations;
            }
            ClashStrategy::Persist { path } => {
                let overlay = self.render(grid, &violations);
                self.persist(&overlay, path, &mut resolution.diagnostics);
                resolution.overlay = Some(overlay);
                resolution.remaining = violations;
            }
            ClashStrategy::Externalize {
                original,
                error_image,
            } => {
                let overlay = self.render(grid, &violations);
                if self.persist(&overlay, error_image, &mut resolution.diagnostics) {
                    if let Err(e) = self.editor.launch(original, error_image) {
                        resolution.diagnostics.push(Diagnostic::ExternalTool(e));
                    }
                }
                resolution.overlay = Some(overlay);
                resolution.remaining = violations;
            }
            ClashStrategy::Autofix { tolerance } => {
                for violation in &violations {
                    autofix::fix_char(
                        grid,
                        violation.col,
                        violation.row,
                        &self.palette,
                        *tolerance,
                        &mut resolution.diagnostics,
                    );
                }
                resolution.remaining = detect(grid).collect();
                tracing::debug!(
                    fixed = violations.len().saturating_sub(resolution.remaining.len()),
                    remaining = resolution.remaining.len(),
                    "Autofix finished"
                );
            }
        }

        resolution
    }

    fn render(&self, grid: &CharGrid, violations: &[ClashViolation]) -> ErrorOverlay {
        ErrorOverlay::render(&grid.to_quantized(), grid.mode(), &self.palette, violations)
    }

    fn persist(&self, overlay: &ErrorOverlay, path: &Path, diagnostics: &mut Vec<Diagnostic>) -> bool {
        match self.sink.persist(overlay, path) {
            Ok(()) => true,
            Err(e) => {
                diagnostics.push(Diagnostic::OverlayNotSaved {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExternalToolError;
    use crate::grid::{Mode, QuantizedGrid};
    use crate::palette::PaletteName;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        shown: RefCell<usize>,
        saved: RefCell<Vec<PathBuf>>,
        fail_save: bool,
    }

    impl OverlaySink for RecordingSink {
        fn show(&self, _overlay: &ErrorOverlay) -> Result<(), ExternalToolError> {
            *self.shown.borrow_mut() += 1;
            Ok(())
        }

        fn persist(&self, _overlay: &ErrorOverlay, path: &Path) -> std::io::Result<()> {
            if self.fail_save {
                return Err(std::io::Error::other("disk full"));
            }
            self.saved.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingEditor {
        launched: RefCell<Vec<(PathBuf, PathBuf)>>,
        missing: bool,
    }

    impl ExternalEditor for RecordingEditor {
        fn launch(&self, original: &Path, error_image: &Path) -> Result<(), ExternalToolError> {
            if self.missing {
                return Err(ExternalToolError::NotFound {
                    command: "grafx2".to_string(),
                });
            }
            self.launched
                .borrow_mut()
                .push((original.to_path_buf(), error_image.to_path_buf()));
            Ok(())
        }
    }

    fn clashing_grid() -> CharGrid {
        let mut grid = QuantizedGrid::filled(320, 200, 0);
        grid.set(0, 0, 1);
        grid.set(1, 0, 2);
        CharGrid::partition(&grid, Mode::Hires, 0).unwrap()
    }

    fn palette() -> Palette {
        Palette::named(PaletteName::Pepto)
    }

    #[test]
    fn test_report_does_not_mutate() {
        let mut grid = clashing_grid();
        let before = grid.clone();
        let violations: Vec<_> = detect(&grid).collect();

        let resolution = ClashResolver::detached(palette()).resolve(
            &mut grid,
            violations.clone(),
            &ClashStrategy::Report,
        );

        assert_eq!(grid, before);
        assert_eq!(resolution.remaining, violations);
        assert!(resolution.overlay.is_none());
    }

    #[test]
    fn test_visualize_shows_overlay() {
        let sink = RecordingSink::default();
        let editor = RecordingEditor::default();
        let resolver = ClashResolver::new(palette(), &sink, &editor);
        let mut grid = clashing_grid();
        let violations: Vec<_> = detect(&grid).collect();

        let resolution = resolver.resolve(&mut grid, violations, &ClashStrategy::Visualize);

        assert_eq!(*sink.shown.borrow(), 1);
        assert!(resolution.overlay.is_some());
        assert_eq!(resolution.remaining.len(), 1);
    }

    #[test]
    fn test_persist_failure_is_a_diagnostic() {
        let sink = RecordingSink {
            fail_save: true,
            ..Default::default()
        };
        let editor = RecordingEditor::default();
        let resolver = ClashResolver::new(palette(), &sink, &editor);
        let mut grid = clashing_grid();
        let violations: Vec<_> = detect(&grid).collect();

        let resolution = resolver.resolve(
            &mut grid,
            violations,
            &ClashStrategy::Persist {
                path: PathBuf::from("pic_error.png"),
            },
        );

        assert!(matches!(
            resolution.diagnostics.as_slice(),
            [Diagnostic::OverlayNotSaved { .. }]
        ));
    }

    #[test]
    fn test_externalize_saves_then_launches() {
        let sink = RecordingSink::default();
        let editor = RecordingEditor::default();
        let resolver = ClashResolver::new(palette(), &sink, &editor);
        let mut grid = clashing_grid();
        let violations: Vec<_> = detect(&grid).collect();

        let strategy = ClashStrategy::Externalize {
            original: PathBuf::from("pic.png"),
            error_image: PathBuf::from("pic_error.png"),
        };
        let resolution = resolver.resolve(&mut grid, violations, &strategy);

        assert_eq!(*sink.saved.borrow(), vec![PathBuf::from("pic_error.png")]);
        assert_eq!(
            *editor.launched.borrow(),
            vec![(PathBuf::from("pic.png"), PathBuf::from("pic_error.png"))]
        );
        assert!(resolution.diagnostics.is_empty());
        assert_eq!(resolution.remaining.len(), 1);
    }

    #[test]
    fn test_externalize_missing_editor_is_not_fatal() {
        let sink = RecordingSink::default();
        let editor = RecordingEditor {
            missing: true,
            ..Default::default()
        };
        let resolver = ClashResolver::new(palette(), &sink, &editor);
        let mut grid = clashing_grid();
        let violations: Vec<_> = detect(&grid).collect();

        let strategy = ClashStrategy::Externalize {
            original: PathBuf::from("pic.png"),
            error_image: PathBuf::from("pic_error.png"),
        };
        let resolution = resolver.resolve(&mut grid, violations, &strategy);

        assert_eq!(sink.saved.borrow().len(), 1);
        assert!(matches!(
            resolution.diagnostics.as_slice(),
            [Diagnostic::ExternalTool(ExternalToolError::NotFound { .. })]
        ));
    }

    #[test]
    fn test_autofix_clears_violations() {
        let mut grid = clashing_grid();
        let violations: Vec<_> = detect(&grid).collect();

        let resolution = ClashResolver::detached(palette()).resolve(
            &mut grid,
            violations,
            &ClashStrategy::autofix(),
        );

        assert!(resolution.is_clean());
        assert_eq!(detect(&grid).count(), 0);
    }

    #[test]
    fn test_nothing_to_resolve() {
        let mut grid = CharGrid::partition(&QuantizedGrid::filled(160, 200, 3), Mode::Multicolor, 3)
            .unwrap();
        let resolution =
            ClashResolver::detached(palette()).resolve(&mut grid, Vec::new(), &ClashStrategy::Visualize);
        assert!(resolution.is_clean());
        assert!(resolution.overlay.is_none());
    }
}
