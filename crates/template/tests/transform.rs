use canonical::compare;
use compliance::{check_aciss, check_xhtml, CompliancePolicy};
use template::{rebuild, restructure, ChapterOutline, TransformMode};

const SOURCE_CHAPTER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en">
<head>
  <title>Chapter II – Roots and Wings</title>
  <link rel="stylesheet" type="text/css" href="../styles/style.css"/>
</head>
<body class="chap-title">
<section class="chap-title">
  <div class="chapter-number-brush">
    <div class="chapter-number-text">II</div>
  </div>
  <div class="chapter-title-container">
    <div class="chapter-title-stack">
      <div class="chapter-title-vertical" aria-hidden="true"></div>
      <div>
        <h1 class="chapter-title chapter-title-word">Roots</h1>
        <h1 class="chapter-title chapter-title-word">and</h1>
        <h1 class="chapter-title chapter-title-word">Wings</h1>
      </div>
    </div>
  </div>
  <figure class="bible-quote-container">
    <blockquote class="bible-quote-text">Train up a child in the way he should go.</blockquote>
    <figcaption class="bible-quote-reference">Proverbs 22:6</figcaption>
  </figure>
  <div class="introduction-paragraph dropcap-first-letter"><p>Every salon starts somewhere.</p></div>
</section>
<section class="chap-body">
<div class="content-area">
<h2>First Steps</h2>
<p>Start with what you have &amp; grow from there.</p>
</div>
</section>
<aside class="endnotes"><ol><li>Adapted from a workshop talk.</li></ol></aside>
<section class="quiz-container chap-quiz"><p>What is your first step?</p></section>
<section class="worksheet"><p>Write down three goals.</p></section>
<section class="image-quote"><p>Grow where you are planted.</p></section>
</body>
</html>"#;

#[test]
fn restructure_preserves_visible_text() {
    let restructured = restructure(SOURCE_CHAPTER);
    let result = compare(SOURCE_CHAPTER, &restructured).expect("source has text");
    assert!(result.equivalent, "divergence: {:?}", result.divergence);
    assert_eq!(result.original_sha256, result.transformed_sha256);
}

#[test]
fn restructure_yields_aciss_landmarks() {
    let restructured = restructure(SOURCE_CHAPTER);
    let report = check_aciss(&restructured, &CompliancePolicy::default());
    // The source carries no brushstroke image; everything else is added.
    assert_eq!(report.issues(), vec!["Missing Brushstroke background image (brushstroke-img)"]);
    assert!(restructured.contains("<body class=\"chapter-page\">"));
    assert!(restructured.contains("<section class=\"closing\">"));
}

#[test]
fn rebuild_is_compliant_xhtml() {
    let rebuilt = rebuild(SOURCE_CHAPTER);
    assert!(check_xhtml(&rebuilt).is_valid());
    assert!(check_aciss(&rebuilt, &CompliancePolicy::default()).is_compliant());
}

#[test]
fn rebuild_keeps_slot_text() {
    let outline = ChapterOutline::extract(SOURCE_CHAPTER);
    assert_eq!(outline.numeral, "II");
    assert_eq!(outline.quote_reference, "Proverbs 22:6");

    let rebuilt = TransformMode::Rebuild.apply(SOURCE_CHAPTER);
    for fragment in [
        "Train up a child in the way he should go.",
        "<p>Start with what you have &amp; grow from there.</p>",
        "<li>Adapted from a workshop talk.</li>",
        "<p>Write down three goals.</p>",
        "<p>Grow where you are planted.</p>",
        "<div class=\"title-line\">WINGS</div>",
    ] {
        assert!(rebuilt.contains(fragment), "missing {fragment}");
    }
}

#[test]
fn rebuild_adds_template_text() {
    let rebuilt = rebuild(SOURCE_CHAPTER);
    let result = compare(SOURCE_CHAPTER, &rebuilt).expect("source has text");
    assert!(!result.equivalent);
}

#[test]
fn part_divider_cleanup_preserves_text() {
    let part = "<?xml version=\"1.0\"?>\n<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.1//EN\">\n<html><body>\n\n\n\n<h1>Part I</h1><!--  -->\n<p>Foundations</p></body></html>";
    let cleaned = TransformMode::PartDivider.apply(part);
    assert!(cleaned.contains("<!DOCTYPE html>"));
    assert!(compare(part, &cleaned).expect("part has text").equivalent);
}
