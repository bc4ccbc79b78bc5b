//! Terminal User Interface for browsing one metadata document.
//!
//! A header with the file's name, type and size sits above a scrollable list
//! of tool sections. Typing after `/` narrows the list on every keystroke.
//!
//! Built with ratatui for cross-platform terminal support.

mod app;
mod events;
mod state;
mod theme;

pub use app::run;
pub use state::{ViewLine, ViewerState};
pub use theme::{available_themes, Theme};
