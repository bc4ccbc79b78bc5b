//! Markup sanitizing at the render boundary.

use std::borrow::Cow;

/// Neutralize `& < > " '` so text cannot be read as markup.
///
/// Every string that reaches a markup surface (tool names, labels, values)
/// passes through this one function.
#[must_use]
pub fn escape_markup(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>', '"', '\''][..]) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
