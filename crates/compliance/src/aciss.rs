use serde::{Deserialize, Serialize};

use crate::policy::{CompliancePolicy, RequiredElement};

/// Which ACISS landmarks a chapter lacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AcissReport {
    pub missing_elements: Vec<RequiredElement>,
    pub missing_page_comments: Vec<String>,
}

impl AcissReport {
    pub fn is_compliant(&self) -> bool {
        self.missing_elements.is_empty() && self.missing_page_comments.is_empty()
    }

    /// One line per missing landmark, elements first.
    pub fn issues(&self) -> Vec<String> {
        let elements = self
            .missing_elements
            .iter()
            .map(|e| format!("Missing {} ({})", e.description, e.class));
        let comments = self
            .missing_page_comments
            .iter()
            .map(|c| format!("Missing page structure comment: {c}"));
        elements.chain(comments).collect()
    }
}

/// Checks a chapter for the classes and page comments the policy requires.
///
/// Matching is by substring, as class names and comments never appear in
/// the visible text of a chapter.
pub fn check_aciss(content: &str, policy: &CompliancePolicy) -> AcissReport {
    AcissReport {
        missing_elements: policy
            .required_elements
            .iter()
            .filter(|e| !content.contains(e.class.as_str()))
            .cloned()
            .collect(),
        missing_page_comments: policy
            .required_page_comments
            .iter()
            .filter(|c| !content.contains(c.as_str()))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_document_lists_everything() {
        let report = check_aciss("<html></html>", &CompliancePolicy::default());
        assert!(!report.is_compliant());
        let issues = report.issues();
        assert_eq!(issues.len(), 11);
        assert_eq!(
            issues[0],
            "Missing Roman numeral with brushstroke (chapter-number-brush)"
        );
        assert_eq!(
            issues[10],
            "Missing page structure comment: PAGE 6: QUIZ & WORKSHEET"
        );
    }

    #[test]
    fn title_line_satisfied_by_title_lines() {
        let policy = CompliancePolicy {
            required_elements: vec![RequiredElement::new("title-line", "Individual title lines")],
            required_page_comments: Vec::new(),
            ..Default::default()
        };
        assert!(check_aciss("<div class=\"title-lines\"></div>", &policy).is_compliant());
    }

    #[test]
    fn empty_policy_accepts_anything() {
        let policy = CompliancePolicy {
            required_elements: Vec::new(),
            required_page_comments: Vec::new(),
            ..Default::default()
        };
        let report = check_aciss("", &policy);
        assert!(report.is_compliant());
        assert!(report.issues().is_empty());
    }
}
