use serde::{Deserialize, Serialize};

/// Which required classes a stylesheet mentions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StylesheetReport {
    pub present_classes: Vec<String>,
    pub missing_classes: Vec<String>,
    /// `@font-face` or `font-family` appears somewhere.
    pub has_fonts: bool,
    pub size_bytes: usize,
}

impl StylesheetReport {
    pub fn is_complete(&self) -> bool {
        self.missing_classes.is_empty()
    }
}

pub fn check_stylesheet(css: &str, required: &[String]) -> StylesheetReport {
    let (present_classes, missing_classes): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|class| css.contains(class.as_str()));

    StylesheetReport {
        present_classes,
        missing_classes,
        has_fonts: css.contains("@font-face") || css.contains("font-family"),
        size_bytes: css.len(),
    }
}
