use crate::outline::ChapterOutline;
use crate::title::layout_title_lines;
use crate::PageComment;

const TITLE_LINE_INDENT: &str = "\n                ";

impl ChapterOutline {
    /// Renders the outline into the full six-page ACISS document.
    ///
    /// The document `<title>`, the stacked title lines (upper-cased) and the
    /// `Introduction` heading are template text. They are visible text too,
    /// so a rebuilt chapter is generally not content-equivalent to its
    /// source.
    pub fn render(&self) -> String {
        let title_lines = layout_title_lines(&self.title_words)
            .iter()
            .map(|line| format!("<div class=\"title-line\">{}</div>", line.to_uppercase()))
            .collect::<Vec<_>>()
            .join(TITLE_LINE_INDENT);

        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en">
<head>
    <meta charset="utf-8"/>
    <title>Chapter {numeral} - {full_title}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1"/>
    <link rel="stylesheet" type="text/css" href="../styles/fonts.css"/>
    <link rel="stylesheet" type="text/css" href="../styles/style.css"/>
</head>
<body class="chapter-page">

<!-- {title_page} -->
<section class="chap-title">
    <div class="chapter-number-container">
        <div class="chapter-number-brush">
            <img class="brushstroke-img" src="../images/brushstroke.JPEG" alt="" />
            <div class="chapter-number-text">{numeral}</div>
        </div>
    </div>

    <div class="chapter-title-container">
        <div class="title-stack">
            <div class="title-bar"></div>
            <div class="title-lines">
                {title_lines}
            </div>
        </div>
    </div>

    <div class="bible-quote-container">
        <div class="bible-quote-text">{quote_text}</div>
        <div class="bible-quote-reference">{quote_reference}</div>
    </div>

    <div class="introduction-heading">Introduction</div>
    <div class="introduction-paragraph dropcap-first-letter">
        {introduction}
    </div>
</section>

<!-- {page_break} -->
<div class="page-break"></div>

<!-- {body_page} -->
<section class="chap-body">
    <div class="content-area">
{body}
    </div>
</section>

<!-- {page_break} -->
<div class="page-break"></div>

<!-- {endnotes_page} -->
<aside class="endnotes">
    {endnotes}
</aside>

<!-- {page_break} -->
<div class="page-break"></div>

<!-- {quiz_page} -->
<section class="quiz-container chap-quiz avoid-break">
    {quiz}
</section>

<section class="worksheet avoid-break">
    {worksheet}
</section>

<!-- {closing_page} -->
<section class="closing">
    {closing}
</section>

</body>
</html>"#,
            numeral = self.numeral,
            full_title = self.full_title(),
            title_page = PageComment::Title.label(),
            title_lines = title_lines,
            quote_text = self.quote_text,
            quote_reference = self.quote_reference,
            introduction = self.introduction,
            page_break = PageComment::BREAK,
            body_page = PageComment::Body.label(),
            body = self.body,
            endnotes_page = PageComment::Endnotes.label(),
            endnotes = self.endnotes,
            quiz_page = PageComment::Quiz.label(),
            quiz = self.quiz,
            worksheet = self.worksheet,
            closing_page = PageComment::Closing.label(),
            closing = self.closing,
        )
    }
}

/// Extracts the slots of `content` and renders them into a fresh ACISS
/// document.
pub fn rebuild(content: &str) -> String {
    ChapterOutline::extract(content).render()
}
