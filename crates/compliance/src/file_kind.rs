use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// What an EPUB text file holds, judged by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Chapter,
    PartDivider,
    Other,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Chapter => "chapter",
            Self::PartDivider => "part divider",
            Self::Other => "other",
        })
    }
}

/// Classifies a file by its name, e.g. `9-chapter-i-building-trust.xhtml`
/// or `8-Part-I.xhtml`.
///
/// Only `.xhtml` and `.html` files are chapters or part dividers; the
/// `-chapter-` and `-part-` markers are matched case-insensitively.
///
/// ```rust
/// use compliance::{classify_file_name, FileKind};
///
/// assert_eq!(classify_file_name("9-chapter-i-roots.xhtml"), FileKind::Chapter);
/// assert_eq!(classify_file_name("8-Part-I.xhtml"), FileKind::PartDivider);
/// assert_eq!(classify_file_name("style.css"), FileKind::Other);
/// ```
pub fn classify_file_name(name: &str) -> FileKind {
    let path = Path::new(name);
    let is_markup = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xhtml") || ext.eq_ignore_ascii_case("html"));
    if !is_markup {
        return FileKind::Other;
    }

    let stem = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name)
        .to_ascii_lowercase();
    if stem.contains("-chapter-") {
        FileKind::Chapter
    } else if stem.contains("-part-") {
        FileKind::PartDivider
    } else {
        FileKind::Other
    }
}
