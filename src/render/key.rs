//! Display labels for metadata keys.

/// Turn a raw metadata key into a display label.
///
/// A space is inserted before every run of ASCII uppercase letters that does
/// not start the key, then the first character is uppercased. The result never
/// starts with whitespace. Only the key itself is consulted, so the label of a
/// leaf is the same at any nesting depth.
///
/// ```
/// use metaview::render::format_key;
///
/// assert_eq!(format_key("createDate"), "Create Date");
/// assert_eq!(format_key("ISO"), "ISO");
/// assert_eq!(format_key("gpsDate"), "Gps Date");
/// ```
#[must_use]
pub fn format_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;

    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if let Some(p) = prev {
                if !p.is_ascii_uppercase() {
                    spaced.push(' ');
                }
            }
        }
        spaced.push(c);
        prev = Some(c);
    }

    let trimmed = spaced.trim_start();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
