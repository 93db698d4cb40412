//! Rating Widget: ephemeral star rating for one displayed card.
//!
//! Nothing here is persisted. The owner drops the state when the card leaves
//! the screen, which is what "reset on remount" means in a terminal.

/// Default number of stars per card.
pub const DEFAULT_TOTAL_STARS: usize = 5;

/// Selection and hover preview for one card's stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingState {
    total_stars: usize,
    selected: usize,
    hovered: Option<usize>,
}

impl RatingState {
    /// Creates an unrated widget with `total_stars` stars.
    #[must_use]
    pub const fn new(total_stars: usize) -> Self {
        Self {
            total_stars,
            selected: 0,
            hovered: None,
        }
    }

    /// Number of stars.
    #[must_use]
    pub const fn total_stars(&self) -> usize {
        self.total_stars
    }

    /// Last clicked rating, in `0..=total_stars`.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Index of the star under the pointer, if any.
    #[must_use]
    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Previews a fill of the first `index + 1` stars.
    pub fn hover(&mut self, index: usize) {
        if self.total_stars > 0 {
            self.hovered = Some(index.min(self.total_stars - 1));
        }
    }

    /// Moves the hover one star right, starting from the current rating.
    pub fn hover_next(&mut self) {
        let index = self.hovered.map_or(self.selected, |i| i + 1);
        self.hover(index);
    }

    /// Moves the hover one star left, starting from the current rating.
    pub fn hover_prev(&mut self) {
        let index = self.hovered.unwrap_or(self.selected).saturating_sub(1);
        self.hover(index);
    }

    /// Pointer left the widget: the fill reverts to the last click.
    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// Sets the rating to `index + 1`.
    pub fn click(&mut self, index: usize) {
        if index < self.total_stars {
            self.selected = index + 1;
        }
    }

    /// Clicks the hovered star. Returns whether a star was hovered.
    pub fn click_hovered(&mut self) -> bool {
        match self.hovered {
            Some(index) => {
                self.click(index);
                true
            }
            None => false,
        }
    }

    /// Number of stars currently drawn filled.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.hovered.map_or(self.selected, |i| i + 1)
    }

    /// Whether star `index` is drawn filled.
    #[must_use]
    pub fn is_filled(&self, index: usize) -> bool {
        index < self.filled()
    }

    /// Caption under the stars, e.g. `"3 of 5 stars"`.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{} of {} stars", self.selected, self.total_stars)
    }
}

impl Default for RatingState {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_STARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unrated() {
        let rating = RatingState::default();
        assert_eq!(rating.filled(), 0);
        assert_eq!(rating.caption(), "0 of 5 stars");
    }

    #[test]
    fn hover_previews_without_selecting() {
        let mut rating = RatingState::default();
        rating.hover(2);
        assert_eq!(rating.filled(), 3);
        assert!(rating.is_filled(2));
        assert!(!rating.is_filled(3));
        assert_eq!(rating.selected(), 0);
    }

    #[test]
    fn leave_reverts_to_last_click() {
        let mut rating = RatingState::default();
        rating.click(1);
        rating.hover(4);
        assert_eq!(rating.filled(), 5);
        rating.leave();
        assert_eq!(rating.filled(), 2);
        assert_eq!(rating.caption(), "2 of 5 stars");
    }

    #[test]
    fn keyboard_hover_walks_from_current_rating() {
        let mut rating = RatingState::default();
        rating.click(2);
        rating.hover_next();
        assert_eq!(rating.hovered(), Some(3));
        rating.hover_next();
        rating.hover_next();
        assert_eq!(rating.hovered(), Some(4));
        rating.hover_prev();
        assert_eq!(rating.hovered(), Some(3));
        assert!(rating.click_hovered());
        assert_eq!(rating.selected(), 4);
    }

    #[test]
    fn out_of_range_click_is_ignored() {
        let mut rating = RatingState::new(3);
        rating.click(3);
        assert_eq!(rating.selected(), 0);
        assert!(!rating.click_hovered());
    }
}
