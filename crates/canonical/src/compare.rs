//! Content-preservation comparison.
//!
//! Two documents are equivalent when their canonical texts are identical,
//! character for character. There is no tolerance: one changed apostrophe is
//! an inequivalence. When the canonical lengths are close, the result also
//! pinpoints the first differing character; when they are far apart the
//! offset says little, so only the lengths are reported.

use serde::{Deserialize, Serialize};

use crate::document::CanonicalDocument;

/// Where two canonical texts first differ.
///
/// `offset` counts characters from the start of both texts. The context
/// strings are windows of each text around that offset, clamped to the text
/// bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Divergence {
    pub offset: usize,
    pub original_context: String,
    pub transformed_context: String,
}

/// Outcome of comparing an original document with its transformation.
///
/// ```rust
/// use canonical::compare;
///
/// let result = compare("<p>Alpha Beta Gamma</p>", "<p>Alpha Gamma</p>").unwrap();
/// assert!(!result.equivalent);
/// assert_eq!(result.original_len, 16);
/// assert_eq!(result.transformed_len, 11);
/// assert_eq!(result.divergence.as_ref().map(|d| d.offset), Some(6));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonResult {
    pub equivalent: bool,
    /// Canonical length of the original, in characters.
    pub original_len: usize,
    /// Canonical length of the transformation, in characters.
    pub transformed_len: usize,
    pub original_sha256: String,
    pub transformed_sha256: String,
    /// Present only for inequivalent documents whose lengths differ by less
    /// than the configured threshold.
    pub divergence: Option<Divergence>,
}

impl ComparisonResult {
    pub(crate) fn between(
        original: &CanonicalDocument,
        transformed: &CanonicalDocument,
        divergence_threshold: usize,
        context_radius: usize,
    ) -> Self {
        let equivalent = original.text == transformed.text;
        let divergence = if !equivalent
            && original.char_len.abs_diff(transformed.char_len) < divergence_threshold
        {
            Some(locate_divergence(
                &original.text,
                &transformed.text,
                context_radius,
            ))
        } else {
            None
        };

        Self {
            equivalent,
            original_len: original.char_len,
            transformed_len: transformed.char_len,
            original_sha256: original.sha256_hex.clone(),
            transformed_sha256: transformed.sha256_hex.clone(),
            divergence,
        }
    }

    /// Signed change in canonical length; negative means text was lost.
    pub fn length_delta(&self) -> i64 {
        self.transformed_len as i64 - self.original_len as i64
    }
}

/// Finds the first differing character. When one text is a prefix of the
/// other, the divergence is at the end of the shorter one.
pub fn locate_divergence(original: &str, transformed: &str, context_radius: usize) -> Divergence {
    let offset = original
        .chars()
        .zip(transformed.chars())
        .position(|(o, t)| o != t)
        .unwrap_or_else(|| original.chars().count().min(transformed.chars().count()));

    Divergence {
        offset,
        original_context: context_window(original, offset, context_radius),
        transformed_context: context_window(transformed, offset, context_radius),
    }
}

fn context_window(text: &str, offset: usize, radius: usize) -> String {
    let start = offset.saturating_sub(radius);
    text.chars()
        .skip(start)
        .take(offset.saturating_add(radius) - start)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> CanonicalDocument {
        CanonicalDocument::new(text.to_string(), 1)
    }

    #[test]
    fn identical_texts_are_equivalent_without_divergence() {
        let result = ComparisonResult::between(&doc("A B"), &doc("A B"), 100, 20);
        assert!(result.equivalent);
        assert_eq!(result.divergence, None);
        assert_eq!(result.original_sha256, result.transformed_sha256);
        assert_eq!(result.length_delta(), 0);
    }

    #[test]
    fn same_length_substitution_located() {
        let result = ComparisonResult::between(&doc("Jerry's"), &doc("Jerry\u{2019}s"), 100, 20);
        assert!(!result.equivalent);
        let divergence = result.divergence.expect("divergence");
        assert_eq!(divergence.offset, 5);
        assert_eq!(divergence.original_context, "Jerry's");
        assert_eq!(divergence.transformed_context, "Jerry\u{2019}s");
    }

    #[test]
    fn truncation_diverges_at_shorter_length() {
        let divergence = locate_divergence("abcdef", "abc", 2);
        assert_eq!(divergence.offset, 3);
        assert_eq!(divergence.original_context, "bcde");
        assert_eq!(divergence.transformed_context, "bc");
    }

    #[test]
    fn large_length_difference_skips_offset() {
        let long = "x".repeat(150);
        let result = ComparisonResult::between(&doc(&long), &doc("x"), 100, 20);
        assert!(!result.equivalent);
        assert_eq!(result.divergence, None);
        assert_eq!(result.length_delta(), -149);
    }

    #[test]
    fn threshold_is_exclusive() {
        let original = "y".repeat(110);
        let transformed = "y".repeat(10);
        let at = ComparisonResult::between(&doc(&original), &doc(&transformed), 100, 20);
        assert_eq!(at.divergence, None);
        let above = ComparisonResult::between(&doc(&original), &doc(&transformed), 101, 20);
        assert_eq!(above.divergence.map(|d| d.offset), Some(10));
    }

    #[test]
    fn unbounded_radius_saturates() {
        let divergence = locate_divergence("abcX", "abcY", usize::MAX);
        assert_eq!(divergence.offset, 3);
        assert_eq!(divergence.original_context, "abcX");
        assert_eq!(divergence.transformed_context, "abcY");
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let divergence = locate_divergence("\u{e9}\u{e9}a", "\u{e9}\u{e9}b", 1);
        assert_eq!(divergence.offset, 2);
        assert_eq!(divergence.original_context, "\u{e9}a");
    }
}
