use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::part::clean_part_divider;
use crate::render::rebuild;
use crate::restructure::restructure;

/// Which transformation to run over a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformMode {
    /// Substitute wrappers and classes in place.
    #[default]
    Restructure,
    /// Extract the content slots and render a fresh template.
    Rebuild,
    /// Tidy a part divider file.
    PartDivider,
}

impl TransformMode {
    pub const ALL: [TransformMode; 3] = [Self::Restructure, Self::Rebuild, Self::PartDivider];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restructure => "restructure",
            Self::Rebuild => "rebuild",
            Self::PartDivider => "part-divider",
        }
    }

    pub fn apply(self, content: &str) -> String {
        match self {
            Self::Restructure => restructure(content),
            Self::Rebuild => rebuild(content),
            Self::PartDivider => clean_part_divider(content),
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformMode {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| TemplateError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_leniently() {
        assert_eq!("rebuild".parse::<TransformMode>(), Ok(TransformMode::Rebuild));
        assert_eq!(" Part_Divider ".parse::<TransformMode>(), Ok(TransformMode::PartDivider));
        assert_eq!(
            "reflow".parse::<TransformMode>(),
            Err(TemplateError::UnknownMode("reflow".into()))
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for mode in TransformMode::ALL {
            assert_eq!(mode.to_string().parse::<TransformMode>(), Ok(mode));
        }
    }

    #[test]
    fn apply_dispatches() {
        let input = "<body class=\"chap-title\"></body>";
        assert_eq!(
            TransformMode::Restructure.apply(input),
            "<body class=\"chapter-page\"></body>"
        );
        assert!(TransformMode::Rebuild.apply(input).contains("PAGE 1: TITLE PAGE"));
        assert_eq!(TransformMode::PartDivider.apply(input), input);
    }
}
