//! Header component renderer.

use crate::ui::helpers::{text_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title bar at `row`.
///
/// # Returns
///
/// The next available row.
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = text_width(&header.title).min(cols);
    let padding = cols.saturating_sub(title_len) / 2;

    frame.move_to(row, 1);
    frame.bold();
    frame.fg(&theme.colors.header_fg);
    if let Some(bg) = &theme.colors.header_bg {
        frame.bg(bg);
    }

    frame.pad(padding);
    frame.push(&header.title);
    frame.pad(cols.saturating_sub(padding + title_len));

    frame.reset();
    row + 1
}
