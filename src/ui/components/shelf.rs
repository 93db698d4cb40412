//! Shelf cards with their star rows.

use crate::ui::helpers::{fit, text_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BookCard;

const FILLED_STAR: &str = "★";
const EMPTY_STAR: &str = "☆";

/// Renders cards four lines each: title, author and year, stars, cover URL.
///
/// # Returns
///
/// The next available row.
pub fn render_cards(frame: &mut Frame, row: usize, cards: &[BookCard], theme: &Theme, cols: usize) -> usize {
    let mut current = row;
    for card in cards {
        current = render_card(frame, current, card, theme, cols);
    }
    current
}

fn render_card(frame: &mut Frame, row: usize, card: &BookCard, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(8);

    frame.move_to(row, 1);
    if card.is_focused {
        frame.fg(&theme.colors.selection_fg);
        frame.bg(&theme.colors.selection_bg);
    } else {
        frame.fg(&theme.colors.text_normal);
    }
    frame.bold();
    let title = fit(&format!(" {:>3}. {}", card.number, card.title), width + 6);
    frame.push(&title);
    if card.is_focused {
        frame.pad((width + 6).saturating_sub(text_width(&title)));
    }
    frame.reset();

    frame.move_to(row + 1, 1);
    frame.pad(7);
    frame.fg(&theme.colors.text_dim);
    let details = if card.year_label.is_empty() {
        card.author_line.clone()
    } else {
        format!("{} · {}", card.author_line, card.year_label)
    };
    frame.push(&fit(&details, width));
    frame.reset();

    frame.move_to(row + 2, 1);
    frame.pad(7);
    for (index, filled) in card.stars.iter().enumerate() {
        if card.hovered_star == Some(index) {
            frame.bold();
        }
        if *filled {
            frame.fg(&theme.colors.star_filled);
            frame.push(FILLED_STAR);
        } else {
            frame.fg(&theme.colors.star_empty);
            frame.push(EMPTY_STAR);
        }
        frame.reset();
        frame.push(" ");
    }
    frame.fg(&theme.colors.text_dim);
    frame.push(&format!(" {}", card.rating_caption));
    frame.reset();

    frame.move_to(row + 3, 1);
    frame.pad(7);
    frame.fg(&theme.colors.link_fg);
    frame.push(&fit(&card.cover_url, width));
    frame.reset();

    row + 4
}
