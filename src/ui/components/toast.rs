//! Toast notification, drawn right-aligned on the top row.

use crate::ui::helpers::{fit, text_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

pub fn render_toast(frame: &mut Frame, row: usize, toast: &ToastInfo, theme: &Theme, cols: usize) {
    let (icon, color) = if toast.is_error {
        ("✗", &theme.colors.error_fg)
    } else {
        ("✓", &theme.colors.success_fg)
    };
    let text = fit(&format!(" {icon} {} ", toast.message), cols);

    frame.move_to(row, cols.saturating_sub(text_width(&text)) + 1);
    frame.bold();
    frame.fg(color);
    frame.push(&text);
    frame.reset();
}
