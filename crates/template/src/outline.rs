//! Extraction of the content slots of an existing chapter.
//!
//! Every slot is optional in the source: a missing section yields an empty
//! slot rather than an error. Slot content is kept as raw markup, trimmed.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="chapter-number-text">([IVXLC]+)</div>"#).expect("numeral pattern")
});
static TITLE_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<title>Chapter ([IVXLC]+)[^<]*</title>").expect("title numeral pattern")
});
static TITLE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<h1 class="[^"]*chapter-title-word[^"]*">([^<]+)</h1>"#)
        .expect("title word pattern")
});
static TITLE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<title>Chapter [IVXLC]+ [–-] ([^<]+)</title>").expect("title suffix pattern")
});
static QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<blockquote class="bible-quote-text"[^>]*>(.*?)</blockquote>"#)
        .expect("quote pattern")
});
static QUOTE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<figcaption class="bible-quote-reference"[^>]*>([^<]*)</figcaption>"#)
        .expect("quote reference pattern")
});
static INTRODUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="introduction-paragraph dropcap-first-letter">(.*?)</div>"#)
        .expect("introduction pattern")
});
static ENDNOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<aside class="endnotes"[^>]*>(.*?)</aside>"#).expect("endnotes pattern")
});
static QUIZ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<section class="quiz-container[^"]*"[^>]*>(.*?)</section>"#)
        .expect("quiz pattern")
});
static WORKSHEET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<section class="worksheet[^"]*"[^>]*>(.*?)</section>"#)
        .expect("worksheet pattern")
});
static CLOSING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<section class="image-quote"[^>]*>(.*?)</section>"#)
        .expect("closing pattern")
});

const BODY_OPEN: &str = r#"<section class="chap-body""#;
const ENDNOTES_OPEN: &str = r#"<aside class="endnotes""#;
const CONTENT_AREA_OPEN: &str = r#"<div class="content-area">"#;

/// Numeral used when a chapter names none.
pub const DEFAULT_NUMERAL: &str = "I";

/// The content slots of one chapter, ready to be rendered into the ACISS
/// template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChapterOutline {
    /// Roman numeral as written in the source.
    pub numeral: String,
    pub title_words: Vec<String>,
    pub quote_text: String,
    pub quote_reference: String,
    pub introduction: String,
    pub body: String,
    pub endnotes: String,
    pub quiz: String,
    pub worksheet: String,
    pub closing: String,
}

impl ChapterOutline {
    /// Pulls every slot out of an existing chapter.
    ///
    /// ```rust
    /// use template::ChapterOutline;
    ///
    /// let outline = ChapterOutline::extract(
    ///     "<title>Chapter IV – Growing Your Book</title><section class=\"chap-body\"><p>Hi</p></section>",
    /// );
    /// assert_eq!(outline.numeral, "IV");
    /// assert_eq!(outline.title_words, vec!["Growing", "Your", "Book"]);
    /// assert_eq!(outline.body, "<p>Hi</p>");
    /// ```
    pub fn extract(content: &str) -> Self {
        Self {
            numeral: extract_numeral(content),
            title_words: extract_title_words(content),
            quote_text: first_capture(&QUOTE, content),
            quote_reference: first_capture(&QUOTE_REFERENCE, content),
            introduction: first_capture(&INTRODUCTION, content),
            body: extract_body(content),
            endnotes: first_capture(&ENDNOTES, content),
            quiz: first_capture(&QUIZ, content),
            worksheet: first_capture(&WORKSHEET, content),
            closing: first_capture(&CLOSING, content),
        }
    }

    /// The title as one line, for the document `<title>`.
    pub fn full_title(&self) -> String {
        if self.title_words.is_empty() {
            "Chapter".to_string()
        } else {
            self.title_words.join(" ")
        }
    }
}

fn first_capture(pattern: &Regex, content: &str) -> String {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn extract_numeral(content: &str) -> String {
    [&*NUMERAL, &*TITLE_NUMERAL]
        .into_iter()
        .map(|pattern| first_capture(pattern, content))
        .find(|numeral| !numeral.is_empty())
        .unwrap_or_else(|| DEFAULT_NUMERAL.to_string())
}

fn extract_title_words(content: &str) -> Vec<String> {
    let words: Vec<String> = TITLE_WORD
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();
    if !words.is_empty() {
        return words;
    }
    first_capture(&TITLE_SUFFIX, content)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Everything from the opening `chap-body` tag up to the endnotes (or, with
/// no endnotes, the body's own closing tag), minus a `content-area` wrapper.
fn extract_body(content: &str) -> String {
    let Some(open) = content.find(BODY_OPEN) else {
        return String::new();
    };
    let Some(tag_end) = content[open..].find('>') else {
        return String::new();
    };
    let start = open + tag_end + 1;
    let rest = &content[start..];

    let body = match content.find(ENDNOTES_OPEN) {
        Some(endnotes) if endnotes >= start => {
            let body = content[start..endnotes].trim_end();
            body.strip_suffix("</section>").unwrap_or(body)
        }
        _ => match rest.find("</section>") {
            Some(end) => &rest[..end],
            None => rest,
        },
    }
    .trim();

    match body.strip_prefix(CONTENT_AREA_OPEN) {
        Some(inner) => match inner.rfind("</div>") {
            Some(end) => inner[..end].trim().to_string(),
            None => body.to_string(),
        },
        None => body.to_string(),
    }
}
