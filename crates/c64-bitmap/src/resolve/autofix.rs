//! In-place clash repair.

use super::Diagnostic;
use crate::clash::check_char;
use crate::grid::{CharGrid, Mode};
use crate::palette::Palette;

/// Colors a char keeps after the fix: the background plus the three most
/// frequent others in multicolor, the two most frequent in hires.
fn accepted_colors(by_frequency: &[u8], mode: Mode, background: u8) -> Vec<u8> {
    match mode {
        Mode::Multicolor => {
            let mut accepted = vec![background];
            accepted.extend(
                by_frequency
                    .iter()
                    .copied()
                    .filter(|&c| c != background)
                    .take(mode.max_colors() - 1),
            );
            accepted
        }
        Mode::Hires => by_frequency.iter().copied().take(mode.max_colors()).collect(),
    }
}

fn fallback_color(accepted: &[u8], mode: Mode, background: u8) -> u8 {
    match mode {
        Mode::Multicolor => background,
        Mode::Hires if accepted.contains(&background) => background,
        Mode::Hires => accepted.first().copied().unwrap_or(background),
    }
}

/// Repaint the excess colors of char `(col, row)`.
///
/// Excess colors are handled least frequent first. Each one is merged into
/// the nearest accepted color when that is within `tolerance`; otherwise it
/// becomes the fallback color and an [`Diagnostic::UnmappedColor`] is
/// recorded.
pub(super) fn fix_char(
    grid: &mut CharGrid,
    col: usize,
    row: usize,
    palette: &Palette,
    tolerance: u32,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mode = grid.mode();
    let background = grid.background();
    let ch = grid.get_mut(col, row);

    let by_frequency = ch.colors_by_frequency();
    let accepted = accepted_colors(&by_frequency, mode, background);
    let near = ch.near();

    for &color in by_frequency.iter().rev().filter(|c| !accepted.contains(c)) {
        let substitute = match palette.nearest_among(color, &accepted) {
            Some((candidate, distance)) if distance <= tolerance => {
                tracing::debug!(col, row, from = color, to = candidate, distance, "Remapped color");
                diagnostics.push(Diagnostic::Remapped {
                    col,
                    row,
                    from: color,
                    to: candidate,
                });
                candidate
            }
            _ => {
                let substitute = fallback_color(&accepted, mode, background);
                diagnostics.push(Diagnostic::UnmappedColor {
                    col,
                    row,
                    near,
                    color,
                    substitute,
                });
                substitute
            }
        };
        ch.replace_color(color, substitute);
    }

    if let Some(violation) = check_char(ch, mode, background) {
        tracing::error!(%violation, "Char still clashes after autofix");
    }
}
