//! Presentation transforms for metadata keys and values.
//!
//! - [`format_key`]: raw key to display label
//! - [`render_value`]: metadata value to display text (or skip)
//! - [`escape_markup`]: the single sanitizer applied before markup output
//!
//! All functions here are pure and total.

mod escape;
mod key;
mod value;

pub use escape::escape_markup;
pub use key::format_key;
pub use value::{render_number, render_value};
