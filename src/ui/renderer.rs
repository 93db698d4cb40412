//! Top-level rendering coordinator.
//!
//! Computes the view model from `AppState`, lays it out into a [`Frame`] and
//! prints the frame to stdout, which Zellij draws into the plugin pane.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Pane height in rows
/// * `cols` - Pane width in columns
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    print!("{}", render_to_string(&viewmodel, &state.theme, rows, cols));
}

/// Lays out a view model into an ANSI string without printing it.
#[must_use]
pub fn render_to_string(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut frame = Frame::new();
    components::render_layout(&mut frame, vm, theme, cols, rows);
    frame.into_string()
}
