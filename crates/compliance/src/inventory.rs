use std::collections::BTreeMap;

use canonical::{strip_declarations, strip_tags};
use serde::{Deserialize, Serialize};

use crate::policy::CompliancePolicy;

/// Which content sections a chapter carries and how much text it holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionInventory {
    /// Section name to presence, in name order.
    pub sections: BTreeMap<String, bool>,
    pub page_breaks: usize,
    pub enough_page_breaks: bool,
    pub word_count: usize,
    pub substantial: bool,
}

impl SectionInventory {
    pub fn has(&self, section: &str) -> bool {
        self.sections.get(section).copied().unwrap_or(false)
    }

    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .filter(|(_, present)| !**present)
            .map(|(name, _)| name.as_str())
    }
}

/// Takes stock of a chapter's sections.
///
/// Words are whitespace-separated runs of the text left after comments,
/// declarations and tags are stripped; references are not decoded.
///
/// ```rust
/// use compliance::{inventory_sections, CompliancePolicy};
///
/// let inventory = inventory_sections(
///     "<!-- draft --><p>Three short words</p>",
///     &CompliancePolicy::default(),
/// );
/// assert_eq!(inventory.word_count, 3);
/// assert!(!inventory.substantial);
/// ```
pub fn inventory_sections(content: &str, policy: &CompliancePolicy) -> SectionInventory {
    let sections = policy
        .sections
        .iter()
        .map(|section| {
            let present = section.markers.iter().any(|m| content.contains(m.as_str()));
            (section.name.clone(), present)
        })
        .collect();

    let page_breaks = content.matches(policy.page_break_marker.as_str()).count();
    let text = strip_tags(&strip_declarations(content), false).into_owned();
    let word_count = text.split_whitespace().count();

    SectionInventory {
        sections,
        page_breaks,
        enough_page_breaks: page_breaks >= policy.min_page_breaks,
        word_count,
        substantial: word_count > policy.substantial_word_count,
    }
}
