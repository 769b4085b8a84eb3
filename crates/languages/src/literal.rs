//! Literal token decoding

/// Quote character of an interpreted Go string literal
pub const QUOTE: char = '"';

/// Strip the surrounding double quotes from a literal token.
///
/// Anything that is not a double-quoted token of at least two bytes is
/// returned unchanged. Escape sequences are left as written.
pub fn unquote(raw: &str) -> &str {
    if raw.len() < 2 {
        return raw;
    }
    raw.strip_prefix(QUOTE)
        .and_then(|rest| rest.strip_suffix(QUOTE))
        .unwrap_or(raw)
}
