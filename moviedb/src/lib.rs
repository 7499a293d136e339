//! Terminal movie browser for TMDB
//!
//! Unidirectional data flow:
//! 1. Event (keyboard) -> `Component::handle_event()` -> actions
//! 2. Actions dispatched through the `ViewStore` (a `tui_dispatch` effect store)
//! 3. Reducer updates `ViewState` and declares effects
//! 4. Effects become fetch tasks; completions come back as actions
//! 5. If state changed, re-render
//!
//! [`controller::ViewController`] is the headless core. The terminal
//! [`runtime::Runtime`] and the integration tests both drive it.

pub mod action;
pub mod components;
pub mod config;
pub mod controller;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod store;

pub use action::Action;
pub use controller::ViewController;
pub use state::{Category, RequestStatus, RequestToken, StalePolicy, ViewState};
