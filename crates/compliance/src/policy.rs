use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;

/// A class that must appear somewhere in a compliant chapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequiredElement {
    pub class: String,
    /// Human-readable name used in issue text.
    pub description: String,
}

impl RequiredElement {
    pub fn new(class: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            description: description.into(),
        }
    }
}

/// A named content section, present when any of its markers appears.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionMarker {
    pub name: String,
    pub markers: Vec<String>,
}

impl SectionMarker {
    pub fn new(name: impl Into<String>, markers: &[&str]) -> Self {
        Self {
            name: name.into(),
            markers: markers.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// What a chapter and its stylesheet must contain.
///
/// Every list is plain data so a book with a different template can swap
/// them out from configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompliancePolicy {
    pub required_elements: Vec<RequiredElement>,
    pub required_page_comments: Vec<String>,
    pub sections: Vec<SectionMarker>,
    pub stylesheet_classes: Vec<String>,
    /// Substring counted as one page break in the section inventory.
    pub page_break_marker: String,
    pub min_page_breaks: usize,
    /// A chapter is substantial when its word count is strictly above this.
    pub substantial_word_count: usize,
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self {
            required_elements: vec![
                RequiredElement::new("chapter-number-brush", "Roman numeral with brushstroke"),
                RequiredElement::new("brushstroke-img", "Brushstroke background image"),
                RequiredElement::new("title-stack", "Vertical title stack"),
                RequiredElement::new("title-bar", "Accent bar beside title"),
                RequiredElement::new("title-line", "Individual title lines"),
                RequiredElement::new("bible-quote-container", "Bible quote container"),
                RequiredElement::new("page-break", "Page break elements"),
            ],
            required_page_comments: [
                "PAGE 1: TITLE PAGE",
                "PAGES 2-4: BODY CONTENT",
                "PAGE 5: ENDNOTES",
                "PAGE 6: QUIZ & WORKSHEET",
            ]
            .map(String::from)
            .to_vec(),
            sections: vec![
                SectionMarker::new("chapter_number", &["chapter-number-brush"]),
                SectionMarker::new("title_structure", &["title-stack"]),
                SectionMarker::new("title_bar", &["title-bar"]),
                SectionMarker::new("title_lines", &["title-lines"]),
                SectionMarker::new("bible_quotes", &["bible-quote-container"]),
                SectionMarker::new("footnotes", &["footnote"]),
                SectionMarker::new("case_studies", &["case-study"]),
                SectionMarker::new("interactive", &["quiz-section", "worksheet-section"]),
                SectionMarker::new("closing", &["closing-section"]),
            ],
            stylesheet_classes: [
                "chapter-number-brush",
                "title-stack",
                "title-bar",
                "title-lines",
                "bible-quote-container",
                "footnote",
                "case-study",
                "quiz-section",
                "worksheet-section",
                "closing-section",
            ]
            .map(String::from)
            .to_vec(),
            page_break_marker: "page-break-before".to_string(),
            min_page_breaks: 5,
            substantial_word_count: 1000,
        }
    }
}

impl CompliancePolicy {
    /// Rejects policies that could never match anything.
    pub fn validate(&self) -> Result<(), ComplianceError> {
        if self.page_break_marker.is_empty() {
            return Err(ComplianceError::InvalidPolicy(
                "page_break_marker must not be empty".into(),
            ));
        }
        if let Some(element) = self.required_elements.iter().find(|e| e.class.trim().is_empty()) {
            return Err(ComplianceError::InvalidPolicy(format!(
                "required element '{}' has an empty class",
                element.description
            )));
        }
        if self.required_page_comments.iter().any(|c| c.trim().is_empty()) {
            return Err(ComplianceError::InvalidPolicy(
                "required page comments must not be empty".into(),
            ));
        }
        for section in &self.sections {
            if section.markers.is_empty() || section.markers.iter().any(String::is_empty) {
                return Err(ComplianceError::InvalidPolicy(format!(
                    "section '{}' needs at least one non-empty marker",
                    section.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        let policy = CompliancePolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.required_elements.len(), 7);
        assert_eq!(policy.required_page_comments.len(), 4);
        assert_eq!(policy.min_page_breaks, 5);
    }

    #[test]
    fn empty_marker_rejected() {
        let policy = CompliancePolicy {
            page_break_marker: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(ComplianceError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn section_without_markers_rejected() {
        let policy = CompliancePolicy {
            sections: vec![SectionMarker::new("sidebar", &[])],
            ..Default::default()
        };
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("sidebar"));
    }

    #[test]
    fn partial_policy_fills_defaults() {
        let policy: CompliancePolicy =
            serde_json::from_str(r#"{"min_page_breaks": 3}"#).expect("valid policy json");
        assert_eq!(policy.min_page_breaks, 3);
        assert_eq!(policy.substantial_word_count, 1000);
        assert_eq!(policy.page_break_marker, "page-break-before");
    }
}
