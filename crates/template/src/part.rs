use std::sync::LazyLock;

use regex::Regex;

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*\n\s*\n").expect("blank run pattern"));
static STYLESHEETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<link rel="stylesheet" type="text/css" href="\.\./styles/fonts\.css"\s*/>\s*<link rel="stylesheet" type="text/css" href="\.\./styles/style\.css"\s*/>"#,
    )
    .expect("stylesheet pattern")
});
static META_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta charset="utf-8"\s*/>"#).expect("charset pattern"));
static EMPTY_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*-->").expect("empty comment pattern"));
static LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\n\s*){3,}").expect("line run pattern"));
static DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!DOCTYPE[^>]*>").expect("doctype pattern"));

const STYLESHEET_LINKS: &str = "<link rel=\"stylesheet\" type=\"text/css\" href=\"../styles/fonts.css\" />\n    <link rel=\"stylesheet\" type=\"text/css\" href=\"../styles/style.css\" />";
const HTML5_DOCTYPE: &str = "<!DOCTYPE html>";

/// Tidies a part divider without touching its text.
///
/// Blank-line runs collapse to one blank line, the stylesheet links and
/// `meta charset` get a uniform layout, empty comments go, and any DOCTYPE
/// becomes the HTML5 one unless the document already opens with it.
///
/// ```rust
/// use template::clean_part_divider;
///
/// let out = clean_part_divider("<!DOCTYPE html PUBLIC \"x\">\n<p>Part One</p><!-- -->");
/// assert_eq!(out, "<!DOCTYPE html>\n<p>Part One</p>");
/// ```
pub fn clean_part_divider(content: &str) -> String {
    let content = BLANK_RUN.replace_all(content, "\n\n");
    let content = STYLESHEETS.replace_all(&content, STYLESHEET_LINKS);
    let content = META_CHARSET.replace_all(&content, "<meta charset=\"utf-8\" />");
    let content = EMPTY_COMMENT.replace_all(&content, "");
    let content = LINE_RUN.replace_all(&content, "\n\n");

    if content.trim().starts_with(HTML5_DOCTYPE) {
        content.into_owned()
    } else {
        DOCTYPE.replace_all(&content, HTML5_DOCTYPE).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_collapse() {
        assert_eq!(clean_part_divider("<p>a</p>\n\n\n\n<p>b</p>"), "<p>a</p>\n\n<p>b</p>");
    }

    #[test]
    fn stylesheet_links_normalized() {
        let input = r#"<link rel="stylesheet" type="text/css" href="../styles/fonts.css"/><link rel="stylesheet" type="text/css" href="../styles/style.css"/>"#;
        assert_eq!(clean_part_divider(input), STYLESHEET_LINKS);
    }

    #[test]
    fn meta_charset_normalized() {
        assert_eq!(
            clean_part_divider(r#"<meta charset="utf-8"/>"#),
            r#"<meta charset="utf-8" />"#
        );
    }

    #[test]
    fn doctype_replaced_after_xml_declaration() {
        let input = "<?xml version=\"1.0\"?>\n<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.1//EN\">\n<html></html>";
        assert_eq!(
            clean_part_divider(input),
            "<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n<html></html>"
        );
    }

    #[test]
    fn html5_document_kept() {
        let input = "<!DOCTYPE html>\n<html><body><h1>Part II</h1></body></html>";
        assert_eq!(clean_part_divider(input), input);
    }
}
