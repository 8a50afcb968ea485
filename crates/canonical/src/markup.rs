//! Lexical markup stripping.
//!
//! Tags are removed by pattern, not by parsing: a `>` inside an attribute
//! value ends the tag early and the rest of the attribute leaks into the
//! text. Well-formed chapter XHTML does not put `>` in attributes.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));
static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[?!][^>]*>").expect("declaration pattern"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:address|article|aside|blockquote|br|dd|div|dl|dt|figcaption|figure|footer|h[1-6]|header|hr|li|nav|ol|p|section|table|tbody|td|tfoot|th|thead|tr|ul)\b[^>]*>",
    )
    .expect("block tag pattern")
});

/// Removes comments, the XML prolog, DOCTYPE and any other `<?...>` or
/// `<!...>` construct.
///
/// ```rust
/// use canonical::strip_declarations;
///
/// let text = "<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n<!-- a\n > b -->x";
/// assert_eq!(strip_declarations(text).trim(), "x");
/// ```
pub fn strip_declarations(text: &str) -> Cow<'_, str> {
    match COMMENT.replace_all(text, "") {
        Cow::Borrowed(unchanged) => DECLARATION.replace_all(unchanged, ""),
        Cow::Owned(without_comments) => {
            Cow::Owned(DECLARATION.replace_all(&without_comments, "").into_owned())
        }
    }
}

/// Removes every remaining tag. With `separate_blocks`, block-level tags
/// become a single space so adjacent blocks do not run together.
///
/// ```rust
/// use canonical::strip_tags;
///
/// assert_eq!(strip_tags("<p>A</p><p>B</p>", false), "AB");
/// assert_eq!(strip_tags("<p>A</p><p>B</p>", true), " A  B ");
/// assert_eq!(strip_tags("<b>Hel</b>lo", true), "Hello");
/// ```
pub fn strip_tags(text: &str, separate_blocks: bool) -> Cow<'_, str> {
    if !separate_blocks {
        return TAG.replace_all(text, "");
    }
    match BLOCK_TAG.replace_all(text, " ") {
        Cow::Borrowed(unchanged) => TAG.replace_all(unchanged, ""),
        Cow::Owned(separated) => Cow::Owned(TAG.replace_all(&separated, "").into_owned()),
    }
}
