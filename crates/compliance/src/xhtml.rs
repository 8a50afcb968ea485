use serde::{Deserialize, Serialize};

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Lexical XHTML structure checks. No parser is involved, so a pass means
/// the landmarks are present, not that the document is well-formed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct XhtmlReport {
    pub xml_declaration: bool,
    pub doctype: bool,
    pub xhtml_namespace: bool,
    pub title_element: bool,
    pub stylesheet_link: bool,
    pub body_element: bool,
    pub closing_html: bool,
}

impl XhtmlReport {
    fn checks(&self) -> [(&'static str, bool); 7] {
        [
            ("xml_declaration", self.xml_declaration),
            ("doctype", self.doctype),
            ("xhtml_namespace", self.xhtml_namespace),
            ("title_element", self.title_element),
            ("stylesheet_link", self.stylesheet_link),
            ("body_element", self.body_element),
            ("closing_html", self.closing_html),
        ]
    }

    pub fn passed_count(&self) -> usize {
        self.checks().iter().filter(|(_, ok)| *ok).count()
    }

    pub fn total(&self) -> usize {
        self.checks().len()
    }

    pub fn is_valid(&self) -> bool {
        self.passed_count() == self.total()
    }

    /// Names of the checks that failed, in check order.
    pub fn failures(&self) -> Vec<&'static str> {
        self.checks()
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Runs the structure checks over one document.
///
/// Any `<!DOCTYPE html` counts, so both the XHTML 1.1 public identifier and
/// the HTML5 form pass.
///
/// ```rust
/// use compliance::check_xhtml;
///
/// let report = check_xhtml("<html><body></body></html>");
/// assert!(!report.is_valid());
/// assert_eq!(report.failures()[0], "xml_declaration");
/// ```
pub fn check_xhtml(content: &str) -> XhtmlReport {
    XhtmlReport {
        xml_declaration: content.starts_with("<?xml"),
        doctype: content.contains("<!DOCTYPE html"),
        xhtml_namespace: content.contains(XHTML_NAMESPACE),
        title_element: content.contains("<title>"),
        stylesheet_link: content.contains("stylesheet"),
        body_element: content.contains("<body"),
        closing_html: content.contains("</html>"),
    }
}
