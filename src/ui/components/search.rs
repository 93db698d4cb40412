//! Search bar component renderer.
//!
//! A 3-line bordered input box followed by one status line that shows
//! "Loading..." while a request is in flight, or the latest search error.

use crate::ui::helpers::{fit, text_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Shown in an empty, inactive search box.
const PLACEHOLDER: &str = "Search a book or author";

/// Renders the search box and its status line starting at `row`.
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────────────┐ [margin]
/// [margin] │ Search: dune▏       │ [margin]
/// [margin] └─────────────────────┘ [margin]
/// [margin]   Loading...
/// ```
///
/// # Returns
///
/// The next available row (`row + 4`).
pub fn render_search_bar(frame: &mut Frame, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_active {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    frame.move_to(row, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.fg(border);
    frame.push(&format!("┌{}┐", "─".repeat(inner_width)));
    frame.reset();

    let (text, dimmed) = if search.query.is_empty() && !search.is_active {
        (format!(" {PLACEHOLDER}"), true)
    } else {
        let cursor = if search.is_active { "▏" } else { "" };
        (format!(" Search: {}{cursor}", search.query), false)
    };
    let text = fit(&text, inner_width);
    let padding = inner_width.saturating_sub(text_width(&text));

    frame.move_to(row + 1, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.fg(border);
    frame.push("│");
    frame.fg(if dimmed {
        &theme.colors.text_dim
    } else {
        &theme.colors.text_normal
    });
    frame.push(&text);
    frame.pad(padding);
    frame.fg(border);
    frame.push("│");
    frame.reset();

    frame.move_to(row + 2, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.fg(border);
    frame.push(&format!("└{}┘", "─".repeat(inner_width)));
    frame.reset();

    frame.move_to(row + 3, 1);
    frame.pad(SEARCH_BOX_MARGIN + 2);
    if search.loading {
        frame.fg(&theme.colors.loading_fg);
        frame.push("Loading...");
    } else if let Some(error) = &search.error {
        frame.fg(&theme.colors.error_fg);
        frame.push(&fit(error, inner_width));
    }
    frame.reset();

    row + 4
}
