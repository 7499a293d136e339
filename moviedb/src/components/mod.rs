//! UI components
//!
//! - Props<'a>: read-only data for rendering (borrowed from state)
//! - handle_event: receives `EventKind`, returns actions to dispatch
//! - render: pure function of props plus internal UI state (scroll offset)

pub mod category_tabs;
pub mod content_view;
pub mod movie_browser;
pub mod movie_grid;
pub mod search_bar;
pub mod status_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use category_tabs::{CategoryTabs, CategoryTabsProps};
pub use content_view::ContentView;
pub use movie_browser::{MovieBrowser, MovieBrowserProps};
pub use movie_grid::{MovieGrid, MovieGridProps};
pub use search_bar::{SearchBar, SearchBarProps, SEARCH_PLACEHOLDER};
pub use status_bar::{StatusBar, StatusBarProps};

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Spinner glyph for an animation frame
pub fn spinner(tick_count: u32) -> &'static str {
    SPINNERS[(tick_count as usize / 2) % SPINNERS.len()]
}
