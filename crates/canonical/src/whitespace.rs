//! Whitespace normalization.
//!
//! Whitespace here is Unicode `White_Space`, which includes tab, newline,
//! carriage return and the no-break space U+00A0. A literal no-break space in
//! a chapter therefore collapses exactly like a decoded `&nbsp;`.
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  hello \u{a0}\r\n world  "), "hello world");
//! ```

/// Collapses every run of whitespace into one ASCII space and trims both
/// ends. Whitespace-only input yields an empty string.
///
/// # Examples
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("Hello\n\n  World\t!"), "Hello World !");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// assert_eq!(collapse_whitespace("hello world"), "hello world");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
