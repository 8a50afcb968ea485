//! In-place restructuring of an existing chapter.
//!
//! Only wrappers, classes, page breaks and comments change. Text nodes are
//! never touched, so a restructured chapter canonicalizes to the same text as
//! its source as long as the source separates blocks with whitespace.

use std::sync::LazyLock;

use regex::Regex;

use crate::PageComment;

static TITLE_STACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<div class="chapter-title-stack">\s*<div class="chapter-title-vertical"[^>]*></div>\s*<div>"#,
    )
    .expect("title stack pattern")
});
static TITLE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<h1 class="chapter-title chapter-title-word">([^<]+)</h1>"#)
        .expect("title word pattern")
});
static TRIPLE_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</div>\s*</div>\s*</div>").expect("closing div pattern")
});
static BEFORE_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"</section>\s*<section class="chap-body""#).expect("body boundary pattern")
});
static BEFORE_ENDNOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"</section>\s*<aside class="endnotes""#).expect("endnotes boundary pattern")
});
static BEFORE_QUIZ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"</aside>\s*<section class="quiz-container"#).expect("quiz boundary pattern")
});

const TITLE_STACK_OPEN: &str = r#"<div class="title-stack">
            <div class="title-bar"></div>
            <div class="title-lines">"#;

const DOUBLE_CLOSE: &str = "</div>\n        </div>";

/// The markup inserted at a page boundary: a page-break div followed by the
/// comment naming the next page.
pub fn page_break(next: PageComment) -> String {
    format!(
        "\n\n<!-- {} -->\n<div class=\"page-break\"></div>\n\n<!-- {} -->\n",
        PageComment::BREAK,
        next.label()
    )
}

/// Rewrites an existing chapter into the ACISS structure by direct
/// substitution.
///
/// ```rust
/// use template::restructure;
///
/// let out = restructure(r#"<h1 class="chapter-title chapter-title-word">Roots</h1>"#);
/// assert_eq!(out, r#"<div class="title-line">Roots</div>"#);
/// ```
pub fn restructure(content: &str) -> String {
    let content = TITLE_STACK.replace_all(content, TITLE_STACK_OPEN);
    let content = TITLE_WORD.replace_all(&content, r#"<div class="title-line">${1}</div>"#);
    let content = TRIPLE_CLOSE.replace_all(&content, DOUBLE_CLOSE);

    let body_break = format!("</section>{}<section class=\"chap-body\"", page_break(PageComment::Body));
    let content = BEFORE_BODY.replace_all(&content, body_break.as_str());
    let endnotes_break = format!("</section>{}<aside class=\"endnotes\"", page_break(PageComment::Endnotes));
    let content = BEFORE_ENDNOTES.replace_all(&content, endnotes_break.as_str());
    let quiz_break = format!("</aside>{}<section class=\"quiz-container", page_break(PageComment::Quiz));
    let content = BEFORE_QUIZ.replace_all(&content, quiz_break.as_str());

    content
        .replace(r#"<body class="chap-title">"#, r#"<body class="chapter-page">"#)
        .replace(
            r#"<section class="quiz-container chap-quiz""#,
            r#"<section class="quiz-container chap-quiz avoid-break""#,
        )
        .replace(
            r#"<section class="worksheet""#,
            r#"<section class="worksheet avoid-break""#,
        )
        .replace(r#"<section class="image-quote""#, r#"<section class="closing""#)
        .replace(
            r#"<section class="chap-title">"#,
            &format!("<!-- {} -->\n<section class=\"chap-title\">", PageComment::Title.label()),
        )
}
