//! The canonical form of one markup document.

use serde::{Deserialize, Serialize};

use crate::hash::hash_canonical_bytes;

/// Canonical text of a document together with its length and digest.
///
/// Lengths are in characters, not bytes, so offsets reported against this
/// text line up with what a reader counts on screen.
///
/// ```rust
/// use canonical::Canonicalizer;
///
/// let doc = Canonicalizer::default().document("<p>Caf\u{e9} &amp; co</p>");
/// assert_eq!(doc.text, "Caf\u{e9} & co");
/// assert_eq!(doc.char_len, 9);
/// assert_eq!(doc.sha256_hex.len(), 64);
/// assert_eq!(doc.canonical_version, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalDocument {
    /// Tag-free, entity-decoded, whitespace-collapsed visible text.
    pub text: String,
    /// Number of characters in `text`.
    pub char_len: usize,
    /// `SHA-256(version || 0x00 || text)` as lowercase hex.
    pub sha256_hex: String,
    /// Configuration version the text was produced under.
    pub canonical_version: u32,
}

impl CanonicalDocument {
    pub(crate) fn new(text: String, canonical_version: u32) -> Self {
        let char_len = text.chars().count();
        let sha256_hex = hash_canonical_bytes(canonical_version, text.as_bytes());
        Self {
            text,
            char_len,
            sha256_hex,
            canonical_version,
        }
    }

    /// True when the document has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
