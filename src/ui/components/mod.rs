//! Composable UI component renderers.
//!
//! Each component draws one part of the screen into a [`Frame`] and returns
//! the next free row, so [`render_layout`] can stack them top to bottom.
//!
//! # Components
//!
//! - `header`: Title bar
//! - `search`: Search input box and its loading/error line
//! - `suggestions`: Search results under the box
//! - `shelf`: Saved book cards with star rows
//! - `pager`: Page controls
//! - `empty`: "No Books Added" state
//! - `toast`: Notification on the top row
//! - `footer`: Keybinding hints

mod empty;
mod footer;
mod header;
mod pager;
mod search;
mod shelf;
mod suggestions;
mod toast;

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use pager::render_pager;
use search::render_search_bar;
use shelf::render_cards;
use suggestions::render_suggestions;
use toast::render_toast;

/// Draws a horizontal separator across the full width.
///
/// # Returns
///
/// The next available row (`row + 1`).
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame.move_to(row, 1);
    frame.fg(color);
    frame.push(&"─".repeat(cols));
    frame.reset();
    row + 1
}

/// Lays out the whole screen.
///
/// ```text
/// [toast, right-aligned]
/// [Header]
/// [Border]
/// [Search box - 3 lines]
/// [Loading / error]
/// [Suggestions - 2 lines each]
/// [Border]
/// [Cards - 4 lines each] or [Empty state]
/// [Pager]
/// ...
/// [Border]
/// [Footer]
/// ```
pub fn render_layout(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    if let Some(toast) = &vm.toast {
        render_toast(frame, 1, toast, theme, cols);
    }

    let mut current_row = 2;
    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(frame, current_row, &vm.search_bar, theme, cols);
    current_row = render_suggestions(frame, current_row, &vm.suggestions, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(frame, current_row, empty, theme, cols);
    } else {
        current_row = render_cards(frame, current_row, &vm.cards, theme, cols);
        if let Some(pager) = vm.pager {
            render_pager(frame, current_row, pager, theme, cols);
        }
    }

    let footer_row = rows;
    render_border(frame, footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(frame, footer_row, &vm.footer, theme, cols);
}
