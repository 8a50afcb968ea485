use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::compare::ComparisonResult;
use crate::config::CanonicalConfig;
use crate::document::CanonicalDocument;
use crate::entity::EntityTable;
use crate::error::{decode_utf8, CanonicalError, DocumentSide};
use crate::markup::{strip_declarations, strip_tags};
use crate::whitespace::collapse_whitespace;

static LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*→\s*").expect("line marker pattern"));
static RULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*___+\s*").expect("rule line pattern"));

static DEFAULT: LazyLock<Canonicalizer> = LazyLock::new(Canonicalizer::default);

/// A validated, compiled [`CanonicalConfig`].
///
/// Holds no mutable state, so one instance can be shared by reference
/// across threads.
///
/// ```rust
/// use canonical::{Canonicalizer, CanonicalConfig};
///
/// let canonicalizer = Canonicalizer::new(CanonicalConfig {
///     separate_block_tags: true,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(canonicalizer.canonicalize("<div>A<br/>B</div>"), "A B");
/// ```
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    config: CanonicalConfig,
    entities: EntityTable,
}

impl Canonicalizer {
    pub fn new(config: CanonicalConfig) -> Result<Self, CanonicalError> {
        config.validate()?;
        let entities = EntityTable::new(&config.entities);
        Ok(Self { config, entities })
    }

    pub fn config(&self) -> &CanonicalConfig {
        &self.config
    }

    /// Reduces markup to its canonical visible text.
    ///
    /// Steps run in a fixed order: declarations and comments, remaining
    /// tags, character references, whitespace collapse and trim. Decoding
    /// runs after tag stripping, so `&lt;b&gt;` survives as the literal text
    /// `<b>`.
    pub fn canonicalize(&self, input: &str) -> String {
        let normalized: Cow<str> = if self.config.normalize_unicode {
            Cow::Owned(input.nfc().collect())
        } else {
            Cow::Borrowed(input)
        };

        let undeclared = strip_declarations(&normalized);
        let untagged = strip_tags(&undeclared, self.config.separate_block_tags);
        let decoded = self.entities.decode(&untagged);
        let collapsed = collapse_whitespace(&decoded);
        self.strip_artifacts(collapsed)
    }

    /// Like [`canonicalize`](Self::canonicalize) for raw bytes, which must be
    /// UTF-8.
    pub fn canonicalize_bytes(&self, input: &[u8]) -> Result<String, CanonicalError> {
        let text = decode_utf8(input, DocumentSide::Input)?;
        Ok(self.canonicalize(text))
    }

    /// Canonical text plus length and digest.
    pub fn document(&self, input: &str) -> CanonicalDocument {
        CanonicalDocument::new(self.canonicalize(input), self.config.version)
    }

    /// Compares the canonical text of `original` and `transformed`.
    ///
    /// Fails with [`CanonicalError::EmptyContent`] when the original has no
    /// visible text. An empty transformation of a non-empty original is an
    /// ordinary inequivalence.
    pub fn compare(
        &self,
        original: &str,
        transformed: &str,
    ) -> Result<ComparisonResult, CanonicalError> {
        let original = self.document(original);
        if original.is_empty() {
            return Err(CanonicalError::EmptyContent);
        }
        let transformed = self.document(transformed);
        Ok(ComparisonResult::between(
            &original,
            &transformed,
            self.config.divergence_threshold,
            self.config.context_radius,
        ))
    }

    /// [`compare`](Self::compare) for raw bytes. A decoding failure names
    /// the side that failed; the original is checked first.
    pub fn compare_bytes(
        &self,
        original: &[u8],
        transformed: &[u8],
    ) -> Result<ComparisonResult, CanonicalError> {
        let original = decode_utf8(original, DocumentSide::Original)?;
        let transformed = decode_utf8(transformed, DocumentSide::Transformed)?;
        self.compare(original, transformed)
    }

    fn strip_artifacts(&self, text: String) -> String {
        if !self.config.strip_line_markers && !self.config.strip_rule_lines {
            return text;
        }
        let mut text = text;
        if self.config.strip_line_markers {
            if let Cow::Owned(stripped) = LINE_MARKER.replace_all(&text, "") {
                text = stripped;
            }
        }
        if self.config.strip_rule_lines {
            if let Cow::Owned(stripped) = RULE_LINE.replace_all(&text, "") {
                text = stripped;
            }
        }
        let trimmed = text.trim();
        if trimmed.len() == text.len() {
            text
        } else {
            trimmed.to_string()
        }
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        let config = CanonicalConfig::default();
        let entities = EntityTable::new(&config.entities);
        Self { config, entities }
    }
}

/// Canonicalizes with the default configuration.
///
/// ```rust
/// use canonical::canonicalize;
///
/// assert_eq!(canonicalize("<p>Hello <b>World</b></p>"), "Hello World");
/// assert_eq!(canonicalize("Tom &amp; Jerry&apos;s"), "Tom & Jerry's");
/// ```
pub fn canonicalize(input: &str) -> String {
    DEFAULT.canonicalize(input)
}

/// Compares two documents with the default configuration.
pub fn compare(original: &str, transformed: &str) -> Result<ComparisonResult, CanonicalError> {
    DEFAULT.compare(original, transformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_chapter_head_reduces_to_title_text() {
        let input = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE html>\n\
                     <html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n\
                     <title>Chapter I</title>\n</head>\n<body>\n<!-- PAGE 1 -->\n\
                     <p>First&nbsp;line</p>\n</body>\n</html>";
        assert_eq!(canonicalize(input), "Chapter I First line");
    }

    #[test]
    fn decoded_brackets_are_not_stripped() {
        assert_eq!(canonicalize("<p>&lt;b&gt;bold&lt;/b&gt;</p>"), "<b>bold</b>");
    }

    #[test]
    fn unicode_normalization_is_opt_in() {
        let decomposed = "Cafe\u{0301}";
        assert_eq!(canonicalize(decomposed), decomposed);

        let nfc = Canonicalizer::new(CanonicalConfig {
            normalize_unicode: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(nfc.canonicalize(decomposed), "Caf\u{e9}");
    }

    #[test]
    fn artifact_stripping() {
        let canonicalizer = Canonicalizer::new(CanonicalConfig {
            strip_line_markers: true,
            strip_rule_lines: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            canonicalizer.canonicalize("<p>→ Name: ______</p>"),
            "Name:"
        );
        assert_eq!(canonicalizer.canonicalize("a ___ b"), "ab");
        assert_eq!(canonicalize("<p>→ Name: ______</p>"), "→ Name: ______");
    }

    #[test]
    fn empty_baseline_is_reported() {
        assert_eq!(
            compare("<div></div>", "<div>Text</div>"),
            Err(CanonicalError::EmptyContent)
        );
    }

    #[test]
    fn empty_transformation_is_inequivalence() {
        let result = compare("<p>Text</p>", "<p></p>").expect("comparison");
        assert!(!result.equivalent);
        assert_eq!(result.transformed_len, 0);
        assert_eq!(result.divergence.map(|d| d.offset), Some(0));
    }

    #[test]
    fn canonicalize_bytes_rejects_invalid_utf8() {
        let canonicalizer = Canonicalizer::default();
        assert_eq!(
            canonicalizer.canonicalize_bytes(&[b'<', b'p', b'>', b'A', 0xC3, 0x28]),
            Err(CanonicalError::Decoding {
                side: DocumentSide::Input,
                valid_up_to: 4
            })
        );
    }

    #[test]
    fn canonicalize_bytes_matches_text_path() {
        let input = "<p>Tom &amp; Jerry&apos;s   salon</p>";
        let canonicalizer = Canonicalizer::default();
        assert_eq!(
            canonicalizer.canonicalize_bytes(input.as_bytes()).unwrap(),
            canonicalizer.canonicalize(input)
        );
    }

    #[test]
    fn huge_context_radius_takes_whole_texts() {
        let canonicalizer = Canonicalizer::new(CanonicalConfig {
            context_radius: usize::MAX,
            ..Default::default()
        })
        .unwrap();
        let result = canonicalizer
            .compare("<p>Alpha Beta</p>", "<p>Alpha Beto</p>")
            .unwrap();
        let divergence = result.divergence.expect("divergence");
        assert_eq!(divergence.offset, 9);
        assert_eq!(divergence.original_context, "Alpha Beta");
        assert_eq!(divergence.transformed_context, "Alpha Beto");
    }

    #[test]
    fn compare_bytes_checks_original_first() {
        let canonicalizer = Canonicalizer::default();
        assert_eq!(
            canonicalizer.compare_bytes(&[0xFF], &[0xFE]),
            Err(CanonicalError::Decoding {
                side: DocumentSide::Original,
                valid_up_to: 0
            })
        );
        assert_eq!(
            canonicalizer.compare_bytes(b"<p>x</p>", &[b'x', 0xFE]),
            Err(CanonicalError::Decoding {
                side: DocumentSide::Transformed,
                valid_up_to: 1
            })
        );
    }

    #[test]
    fn digest_tracks_config_version() {
        let v2 = Canonicalizer::new(CanonicalConfig {
            version: 2,
            ..Default::default()
        })
        .unwrap();
        let a = Canonicalizer::default().document("<p>same</p>");
        let b = v2.document("<p>same</p>");
        assert_eq!(a.text, b.text);
        assert_ne!(a.sha256_hex, b.sha256_hex);
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let res = Canonicalizer::new(CanonicalConfig {
            version: 0,
            ..Default::default()
        });
        assert!(matches!(res, Err(CanonicalError::InvalidConfig(_))));
    }

    #[test]
    fn canonicalizer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Canonicalizer>();
    }
}
