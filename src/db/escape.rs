//! Identifier quoting for generated SQL.

/// Wrap `s` in `quote_char`, doubling every embedded occurrence of it.
///
/// # Arguments
/// * `s` - The text to quote
/// * `quote_char` - The delimiter ('"' for identifiers)
fn quote_with(s: &str, quote_char: char) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push(quote_char);
    for c in s.chars() {
        if c == quote_char {
            result.push(c);
        }
        result.push(c);
    }
    result.push(quote_char);
    result
}

/// Quote a PostgreSQL identifier (`O"Brien` becomes `"O""Brien"`).
///
/// This protects the identifier position only; it is not parameterization.
#[inline]
pub fn quote_identifier(s: &str) -> String {
    quote_with(s, '"')
}
