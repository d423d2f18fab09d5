//! Hex color normalization

/// Normalize a color value to six uppercase hex digits.
///
/// A leading `#` is optional. Three-digit shorthand is expanded by doubling
/// each digit and an eight-digit value loses its alpha channel. Anything else
/// is rejected.
pub fn normalize_hex(value: &str) -> Option<String> {
    let value = value.trim();
    let content = value.strip_prefix('#').unwrap_or(value).to_ascii_uppercase();
    if content.is_empty() || !content.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match content.len() {
        3 => Some(content.chars().flat_map(|c| [c, c]).collect()),
        6 => Some(content),
        8 => Some(content[..6].to_string()),
        _ => None,
    }
}
