//! Suggestion list under the search bar.

use crate::ui::helpers::{fit, push_highlighted, text_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SuggestionItem;

const INDENT: usize = 7;

/// Renders each suggestion on two lines: title, then author and cover URL.
///
/// # Returns
///
/// The next available row.
pub fn render_suggestions(frame: &mut Frame, row: usize, items: &[SuggestionItem], theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(INDENT + 2);
    let mut current = row;

    for item in items {
        frame.move_to(current, 1);
        frame.pad(INDENT - 2);
        if item.is_highlighted {
            frame.fg(&theme.colors.selection_fg);
            frame.bg(&theme.colors.selection_bg);
            frame.bold();
            frame.push("> ");
        } else {
            frame.fg(&theme.colors.text_normal);
            frame.push("  ");
        }
        let title = fit(&item.title, width);
        push_highlighted(frame, &title, &item.highlight_ranges, theme, item.is_highlighted);
        if item.is_highlighted {
            frame.pad(width.saturating_sub(text_width(&title)));
        }
        frame.reset();

        frame.move_to(current + 1, 1);
        frame.pad(INDENT + 2);
        frame.fg(&theme.colors.text_dim);
        let authors = if item.author_line.is_empty() {
            String::new()
        } else {
            format!("{}  ", item.author_line)
        };
        let authors = fit(&authors, width.saturating_sub(2));
        frame.push(&authors);
        frame.fg(&theme.colors.link_fg);
        frame.push(&fit(&item.cover_url, width.saturating_sub(2 + text_width(&authors))));
        frame.reset();

        current += 2;
    }

    current
}
