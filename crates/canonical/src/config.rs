//! Configuration types for markup canonicalization and comparison.
//!
//! [`CanonicalConfig`] is plain data: it is validated and compiled once by
//! [`Canonicalizer::new`](crate::Canonicalizer::new), and every comparison
//! made through that canonicalizer uses exactly that configuration. Two
//! canonicalizers with different entity tables can run side by side.
//!
//! # Versioning
//!
//! The `version` field is folded into every canonical digest. Bump it
//! whenever a change to the configuration changes canonical output, so that
//! digests recorded under the old behaviour are never confused with new ones.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalConfig;
//!
//! let config = CanonicalConfig::default();
//! assert_eq!(config.version, 1);
//! assert_eq!(config.entities.get("&amp;").map(String::as_str), Some("&"));
//! assert!(!config.normalize_unicode);
//! assert_eq!(config.divergence_threshold, 100);
//! ```
//!
//! Adding a reference the default table does not know:
//!
//! ```rust
//! use canonical::{Canonicalizer, CanonicalConfig};
//!
//! let mut config = CanonicalConfig::default();
//! config.entities.insert("&mdash;".into(), "\u{2014}".into());
//! let canonicalizer = Canonicalizer::new(config).unwrap();
//! assert_eq!(canonicalizer.canonicalize("a&mdash;b"), "a\u{2014}b");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Character references decoded by default.
///
/// `&nbsp;` decodes to an ordinary space so it collapses with its
/// neighbours.
pub const DEFAULT_ENTITIES: &[(&str, &str)] = &[
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&nbsp;", " "),
    ("&#x27;", "'"),
    ("&#39;", "'"),
];

/// Configuration for canonicalization and comparison.
///
/// Every field has a default, so partial documents deserialize:
///
/// ```rust
/// use canonical::CanonicalConfig;
///
/// let config: CanonicalConfig =
///     serde_json::from_str(r#"{ "divergence_threshold": 40 }"#).unwrap();
/// assert_eq!(config.divergence_threshold, 40);
/// assert_eq!(config.context_radius, 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanonicalConfig {
    /// Behaviour version, mixed into canonical digests. Must be >= 1.
    pub version: u32,

    /// Character references and their replacements, keyed by the full
    /// reference including `&` and `;` (for example `"&amp;"`).
    ///
    /// References that are not in the table are left verbatim.
    pub entities: BTreeMap<String, String>,

    /// Apply Unicode NFC before stripping markup.
    ///
    /// Off by default: a transformation that re-encodes `é` as `e` plus a
    /// combining accent is then reported as a change.
    pub normalize_unicode: bool,

    /// Replace block-level tags (`p`, `div`, `br`, `section`, headings, ...)
    /// with a space instead of removing them.
    ///
    /// With this off, `A<br/>B` canonicalizes to `AB`; with it on, to `A B`.
    pub separate_block_tags: bool,

    /// Drop a leading `→` line-number marker from the canonical text.
    pub strip_line_markers: bool,

    /// Drop worksheet rules (three or more underscores together with the
    /// whitespace around them).
    pub strip_rule_lines: bool,

    /// A divergence offset is only located when the two canonical lengths
    /// differ by less than this many characters.
    pub divergence_threshold: usize,

    /// Characters of context captured on each side of a divergence.
    pub context_radius: usize,
}

impl CanonicalConfig {
    /// Checks the configuration for values that cannot be compiled.
    ///
    /// ```rust
    /// use canonical::{CanonicalConfig, CanonicalError};
    ///
    /// let mut config = CanonicalConfig::default();
    /// config.entities.insert("amp".into(), "&".into());
    /// assert!(matches!(config.validate(), Err(CanonicalError::InvalidConfig(_))));
    /// ```
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.context_radius == 0 {
            return Err(CanonicalError::InvalidConfig(
                "context_radius must be >= 1".into(),
            ));
        }
        for reference in self.entities.keys() {
            validate_reference(reference)?;
        }
        Ok(())
    }
}

fn validate_reference(reference: &str) -> Result<(), CanonicalError> {
    let body = reference
        .strip_prefix('&')
        .and_then(|rest| rest.strip_suffix(';'))
        .ok_or_else(|| {
            CanonicalError::InvalidConfig(format!(
                "entity `{reference}` must start with `&` and end with `;`"
            ))
        })?;
    if body.is_empty() || body.contains(['&', ';']) || body.chars().any(char::is_whitespace) {
        return Err(CanonicalError::InvalidConfig(format!(
            "entity `{reference}` has an invalid name"
        )));
    }
    Ok(())
}

/// The default entity table as an owned map.
pub fn default_entities() -> BTreeMap<String, String> {
    DEFAULT_ENTITIES
        .iter()
        .map(|(reference, replacement)| ((*reference).to_string(), (*replacement).to_string()))
        .collect()
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            version: 1,
            entities: default_entities(),
            normalize_unicode: false,
            separate_block_tags: false,
            strip_line_markers: false,
            strip_rule_lines: false,
            divergence_threshold: 100,
            context_radius: 20,
        }
    }
}
