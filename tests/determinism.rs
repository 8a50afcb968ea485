use std::sync::Arc;
use std::thread;

use aciss::{CanonicalConfig, Canonicalizer, TransformMode, canonicalize};

const SAMPLE: &str = "<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n<body class=\"chap-title\">\
<section class=\"chap-title\"><h1 class=\"chapter-title chapter-title-word\">Faith</h1></section>\n\
<section class=\"chap-body\"><p>Tom &amp; Jerry&apos;s   salon</p></section>\n\
<aside class=\"endnotes\"><p>Note</p></aside>\n\
<section class=\"quiz-container chap-quiz\"><p>Q?</p></section></body>";

#[test]
fn canonical_text_is_stable_across_calls_and_threads() {
    let expected = canonicalize(SAMPLE);
    let canonicalizer = Arc::new(Canonicalizer::default());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let canonicalizer = Arc::clone(&canonicalizer);
            thread::spawn(move || canonicalizer.document(SAMPLE))
        })
        .collect();
    for handle in handles {
        let document = handle.join().expect("worker thread");
        assert_eq!(document.text, expected);
        assert_eq!(document.sha256_hex, canonicalizer.document(SAMPLE).sha256_hex);
    }
}

#[test]
fn transformations_are_deterministic() {
    for mode in TransformMode::ALL {
        assert_eq!(mode.apply(SAMPLE), mode.apply(SAMPLE), "{mode}");
    }
}

#[test]
fn restructuring_twice_keeps_the_text() {
    let once = TransformMode::Restructure.apply(SAMPLE);
    let twice = TransformMode::Restructure.apply(&once);
    assert_eq!(canonicalize(&twice), canonicalize(SAMPLE));
}

#[test]
fn digest_tracks_config_version() {
    let v1 = Canonicalizer::default();
    let v2 = Canonicalizer::new(CanonicalConfig {
        version: 2,
        ..Default::default()
    })
    .unwrap();
    let a = v1.document(SAMPLE);
    let b = v2.document(SAMPLE);
    assert_eq!(a.text, b.text);
    assert_ne!(a.sha256_hex, b.sha256_hex);
}
