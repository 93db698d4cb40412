//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_layout → Frame → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Top-level rendering entry points
//! - [`components`]: Per-section renderers
//! - [`helpers`]: Frame buffer, text fitting, match highlighting
//! - [`theme`]: Color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    BookCard, EmptyState, FooterInfo, HeaderInfo, PagerInfo, SearchBarInfo, SuggestionItem, ToastInfo,
    UIViewModel,
};
