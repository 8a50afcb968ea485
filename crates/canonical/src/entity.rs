//! Character reference decoding.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// A compiled lookup table of character references.
///
/// Decoding is a single left-to-right pass: the output of one replacement is
/// never rescanned, so `&amp;lt;` decodes to `&lt;`, not `<`.
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
    replacements: HashMap<String, String>,
    longest: usize,
}

impl EntityTable {
    /// Builds a table from `reference -> replacement` pairs. Keys are
    /// expected to be validated already (see
    /// [`CanonicalConfig::validate`](crate::CanonicalConfig::validate)).
    pub fn new(entities: &BTreeMap<String, String>) -> Self {
        let longest = entities.keys().map(String::len).max().unwrap_or(0);
        let replacements = entities
            .iter()
            .map(|(reference, replacement)| (reference.clone(), replacement.clone()))
            .collect();
        Self {
            replacements,
            longest,
        }
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Replaces every known reference in `text`; unknown ones stay verbatim.
    pub fn decode<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.replacements.is_empty() || !text.contains('&') {
            return Cow::Borrowed(text);
        }

        let mut decoded = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(amp) = rest.find('&') {
            decoded.push_str(&rest[..amp]);
            let candidate = &rest[amp..];
            match self.lookup(candidate) {
                Some((consumed, replacement)) => {
                    decoded.push_str(replacement);
                    rest = &candidate[consumed..];
                }
                None => {
                    decoded.push('&');
                    rest = &candidate[1..];
                }
            }
        }
        decoded.push_str(rest);
        Cow::Owned(decoded)
    }

    /// Matches the reference starting at the `&` that begins `candidate`.
    fn lookup(&self, candidate: &str) -> Option<(usize, &str)> {
        let window = &candidate.as_bytes()[..candidate.len().min(self.longest)];
        // `;` is ASCII, so `end` is always a char boundary.
        let end = window.iter().position(|&b| b == b';')?;
        let reference = &candidate[..=end];
        self.replacements
            .get(reference)
            .map(|replacement| (reference.len(), replacement.as_str()))
    }
}
