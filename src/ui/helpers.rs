//! Shared rendering utilities.
//!
//! Components draw into a [`Frame`], a string buffer of text and ANSI escapes
//! that the renderer prints in one go. Drawing into a buffer instead of
//! straight to stdout also lets tests inspect what would be shown.

use crate::ui::theme::Theme;

/// Output buffer for one rendered frame.
#[derive(Debug, Default)]
pub struct Frame {
    out: String,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions the cursor (1-indexed row and column).
    pub fn move_to(&mut self, row: usize, col: usize) {
        self.out.push_str(&format!("\u{1b}[{row};{col}H"));
    }

    /// Appends raw text.
    pub fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Appends `count` spaces.
    pub fn pad(&mut self, count: usize) {
        self.out.extend(std::iter::repeat(' ').take(count));
    }

    /// Sets the foreground color.
    pub fn fg(&mut self, hex: &str) {
        self.out.push_str(&Theme::fg(hex));
    }

    /// Sets the background color.
    pub fn bg(&mut self, hex: &str) {
        self.out.push_str(&Theme::bg(hex));
    }

    /// Turns on bold.
    pub fn bold(&mut self) {
        self.out.push_str(Theme::bold());
    }

    /// Turns on dim.
    pub fn dim(&mut self) {
        self.out.push_str(Theme::dim());
    }

    /// Clears all styling.
    pub fn reset(&mut self) {
        self.out.push_str(Theme::reset());
    }

    /// Everything drawn so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the frame.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }
}

/// Number of terminal cells `text` occupies, counting one per char.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` chars, ending in `...` when cut.
///
/// ```
/// use bookshelf::ui::helpers::fit;
///
/// assert_eq!(fit("The Lord of the Rings", 10), "The Lor...");
/// assert_eq!(fit("Emma", 10), "Emma");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Draws `text` with the given char ranges in the match highlight colors.
///
/// Ranges are `(start, end)` char indices, end exclusive. When `is_selected`
/// is set the highlight is skipped so it does not fight the selection colors.
pub fn push_highlighted(frame: &mut Frame, text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        frame.push(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current || start >= end {
            continue;
        }

        frame.push(&chars[current..start].iter().collect::<String>());
        frame.fg(&theme.colors.match_highlight_fg);
        frame.bg(&theme.colors.match_highlight_bg);
        frame.push(&chars[start..end].iter().collect::<String>());
        frame.reset();
        frame.fg(&theme.colors.text_normal);

        current = end;
    }

    frame.push(&chars[current..].iter().collect::<String>());
}
