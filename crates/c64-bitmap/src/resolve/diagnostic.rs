use std::fmt;
use std::path::PathBuf;

use crate::error::ExternalToolError;
use crate::palette::color_name;

/// A note produced while resolving clashes.
///
/// Everything except [`Diagnostic::Remapped`] is a warning the user should
/// see; none of them stop the conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Autofix merged `from` into the close color `to`
    Remapped {
        col: usize,
        row: usize,
        from: u8,
        to: u8,
    },
    /// Autofix found no close enough color for `color` and used `substitute`
    UnmappedColor {
        col: usize,
        row: usize,
        near: (usize, usize),
        color: u8,
        substitute: u8,
    },
    /// The overlay sink could not display the error overlay
    OverlayNotShown(ExternalToolError),
    /// The error overlay could not be written
    OverlayNotSaved { path: PathBuf, reason: String },
    /// The external editor could not be launched
    ExternalTool(ExternalToolError),
}

impl Diagnostic {
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::Remapped { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Remapped { col, row, from, to } => write!(
                f,
                "Char {}, {}: replaced '{}' with '{}'",
                col + 1,
                row + 1,
                color_name(*from),
                color_name(*to)
            ),
            Diagnostic::UnmappedColor {
                col,
                row,
                near,
                color,
                substitute,
            } => write!(
                f,
                "Cannot remap color '{}' in char {}, {} near x={}, y={}; using '{}' instead",
                color_name(*color),
                col + 1,
                row + 1,
                near.0,
                near.1,
                color_name(*substitute)
            ),
            Diagnostic::OverlayNotShown(e) => write!(f, "Cannot display error overlay: {e}"),
            Diagnostic::OverlayNotSaved { path, reason } => {
                write!(f, "Cannot save error overlay to {}: {reason}", path.display())
            }
            Diagnostic::ExternalTool(e) => write!(f, "Cannot open external editor: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{BLACK, YELLOW};

    #[test]
    fn test_unmapped_message() {
        let diagnostic = Diagnostic::UnmappedColor {
            col: 2,
            row: 0,
            near: (10, 4),
            color: YELLOW,
            substitute: BLACK,
        };
        assert_eq!(
            diagnostic.to_string(),
            "Cannot remap color 'Yellow' in char 3, 1 near x=10, y=4; using 'Black' instead"
        );
        assert!(diagnostic.is_warning());
    }
}
