//! Error types produced by the canonical crate.
//!
//! Only three things can go wrong: a configuration is rejected when a
//! [`Canonicalizer`](crate::Canonicalizer) is built, a byte buffer is not
//! UTF-8, or the original document of a comparison carries no visible text.
//! Inequivalence is never an error; it is reported through
//! [`ComparisonResult`](crate::ComparisonResult).
//!
//! # Severity
//!
//! | Error | Severity | Typical caller reaction |
//! |-------|----------|-------------------------|
//! | [`InvalidConfig`](CanonicalError::InvalidConfig) | fatal | fix the configuration |
//! | [`Decoding`](CanonicalError::Decoding) | per-file failure | skip this file, continue the batch |
//! | [`EmptyContent`](CanonicalError::EmptyContent) | warning | report and decide whether to continue |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which document a decoding failure refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSide {
    /// A single document canonicalized on its own.
    Input,
    /// The baseline document of a comparison.
    Original,
    /// The document produced by a transformation.
    Transformed,
}

impl fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentSide::Input => "input",
            DocumentSide::Original => "original",
            DocumentSide::Transformed => "transformed",
        };
        f.write_str(label)
    }
}

/// Errors that can occur during canonicalization and comparison.
///
/// The enum is `#[non_exhaustive]`; match with a catch-all arm.
///
/// # Examples
///
/// ```rust
/// use canonical::{compare, CanonicalError};
///
/// let err = compare("<div></div>", "<div>Text</div>").unwrap_err();
/// assert_eq!(err, CanonicalError::EmptyContent);
/// assert!(err.is_warning());
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The bytes of one document are not valid UTF-8.
    #[error("{side} document is not valid utf-8 (valid up to byte {valid_up_to})")]
    Decoding {
        side: DocumentSide,
        valid_up_to: usize,
    },

    /// The original document has no visible text, so there is no baseline
    /// to compare against.
    #[error("original document has no visible text; comparison baseline is empty")]
    EmptyContent,
}

impl CanonicalError {
    /// Returns true for conditions callers should report as a warning rather
    /// than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, CanonicalError::EmptyContent)
    }
}

/// Decodes `bytes` as UTF-8, attributing failures to `side`.
///
/// ```rust
/// use canonical::{decode_utf8, CanonicalError, DocumentSide};
///
/// assert_eq!(decode_utf8(b"ok", DocumentSide::Input).unwrap(), "ok");
/// assert_eq!(
///     decode_utf8(&[b'a', 0xFF], DocumentSide::Transformed),
///     Err(CanonicalError::Decoding { side: DocumentSide::Transformed, valid_up_to: 1 })
/// );
/// ```
pub fn decode_utf8(bytes: &[u8], side: DocumentSide) -> Result<&str, CanonicalError> {
    std::str::from_utf8(bytes).map_err(|err| CanonicalError::Decoding {
        side,
        valid_up_to: err.valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_error_names_side_and_position() {
        let err = decode_utf8(&[b'o', b'k', 0xC3], DocumentSide::Original).unwrap_err();
        assert_eq!(
            err.to_string(),
            "original document is not valid utf-8 (valid up to byte 2)"
        );
        assert!(!err.is_warning());
    }

    #[test]
    fn only_empty_content_is_a_warning() {
        assert!(CanonicalError::EmptyContent.is_warning());
        assert!(!CanonicalError::InvalidConfig("x".into()).is_warning());
    }
}
