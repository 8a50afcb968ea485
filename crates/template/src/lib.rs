//! Chapter restructuring into the ACISS six-page template.
//!
//! Three transformations are offered, selected by [`TransformMode`]:
//!
//! - [`restructure`] rewrites wrappers and classes in place and inserts page
//!   breaks, leaving every text node alone
//! - [`rebuild`] extracts a [`ChapterOutline`] and renders a fresh document
//! - [`clean_part_divider`] tidies the short files that open each part
//!
//! None of them fail on unexpected input: sections that cannot be found are
//! left as they are (or rendered empty). Whether the text survived is for
//! the `canonical` crate to decide.
//!
//! ```rust
//! use template::TransformMode;
//!
//! let out = TransformMode::Restructure.apply("<body class=\"chap-title\"><p>Hi</p></body>");
//! assert_eq!(out, "<body class=\"chapter-page\"><p>Hi</p></body>");
//! ```

mod error;
mod mode;
mod outline;
mod part;
mod render;
mod restructure;
mod title;

pub use crate::error::TemplateError;
pub use crate::mode::TransformMode;
pub use crate::outline::{ChapterOutline, DEFAULT_NUMERAL};
pub use crate::part::clean_part_divider;
pub use crate::render::rebuild;
pub use crate::restructure::{page_break, restructure};
pub use crate::title::{layout_title_lines, MAX_TITLE_LINES};

use serde::{Deserialize, Serialize};

/// The HTML comments that label each page of an ACISS chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageComment {
    Title,
    Body,
    Endnotes,
    Quiz,
    Closing,
}

impl PageComment {
    /// Comment text placed before every page-break div.
    pub const BREAK: &'static str = "PAGE BREAK";

    /// The four comments a compliant chapter must carry.
    pub const REQUIRED: [PageComment; 4] = [Self::Title, Self::Body, Self::Endnotes, Self::Quiz];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "PAGE 1: TITLE PAGE",
            Self::Body => "PAGES 2-4: BODY CONTENT",
            Self::Endnotes => "PAGE 5: ENDNOTES",
            Self::Quiz => "PAGE 6: QUIZ & WORKSHEET",
            Self::Closing => "CLOSING",
        }
    }
}
