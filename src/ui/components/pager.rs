//! Page controls under the shelf.

use crate::ui::helpers::{text_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PagerInfo;

/// Page numbers shown on either side of the current one before eliding.
const WINDOW: usize = 3;

/// Renders `Page 2 of 5   1 [2] 3 4 5` centered at `row`.
pub fn render_pager(frame: &mut Frame, row: usize, pager: PagerInfo, theme: &Theme, cols: usize) -> usize {
    let label = format!("Page {} of {}   ", pager.current, pager.total);
    let first = pager.current.saturating_sub(WINDOW).max(1);
    let last = (pager.current + WINDOW).min(pager.total);

    let mut numbers: Vec<String> = Vec::new();
    if first > 1 {
        numbers.push("…".to_string());
    }
    numbers.extend((first..=last).map(|page| {
        if page == pager.current {
            format!("[{page}]")
        } else {
            page.to_string()
        }
    }));
    if last < pager.total {
        numbers.push("…".to_string());
    }
    let numbers = numbers.join(" ");

    let width = text_width(&label) + text_width(&numbers);
    frame.move_to(row, 1);
    frame.pad(cols.saturating_sub(width) / 2);
    frame.fg(&theme.colors.text_dim);
    frame.push(&label);
    frame.fg(&theme.colors.search_bar_border);
    frame.push(&numbers);
    frame.reset();

    row + 1
}
