//! Empty shelf message.

use crate::ui::helpers::{text_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the centered message and hint starting at `row`.
///
/// # Returns
///
/// The next available row.
pub fn render_empty_state(frame: &mut Frame, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let msg_len = text_width(&empty.message);
    let msg_padding = cols.saturating_sub(msg_len) / 2;

    frame.move_to(row + 1, 1);
    frame.bold();
    frame.fg(&theme.colors.empty_state_fg);
    frame.pad(msg_padding);
    frame.push(&empty.message);
    frame.pad(cols.saturating_sub(msg_padding + msg_len));
    frame.reset();

    let sub_len = text_width(&empty.subtitle);
    let sub_padding = cols.saturating_sub(sub_len) / 2;

    frame.move_to(row + 2, 1);
    frame.dim();
    frame.fg(&theme.colors.text_dim);
    frame.pad(sub_padding);
    frame.push(&empty.subtitle);
    frame.pad(cols.saturating_sub(sub_padding + sub_len));
    frame.reset();

    row + 3
}
