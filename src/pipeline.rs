use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use canonical::{CanonicalError, Canonicalizer, ComparisonResult, DocumentSide, decode_utf8};
use serde::Serialize;
use template::TransformMode;
use tracing::{Level, info, warn};

use crate::error::FileError;

/// Outcome of comparing an original file with its processed counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub original: PathBuf,
    pub processed: PathBuf,
    pub comparison: ComparisonResult,
}

impl Verification {
    pub fn preserved(&self) -> bool {
        self.comparison.equivalent
    }
}

/// Outcome of transforming one file.
#[derive(Debug, Clone, Serialize)]
pub struct TransformOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: TransformMode,
    /// `None` when the input has no visible text to compare against.
    pub comparison: Option<ComparisonResult>,
}

impl TransformOutcome {
    pub fn preserved(&self) -> bool {
        self.comparison.as_ref().is_some_and(|c| c.equivalent)
    }
}

/// Reads a file and decodes it as UTF-8, attributing a decoding failure to
/// `side`.
pub fn read_document(path: &Path, side: DocumentSide) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|err| FileError::io(path, err))?;
    let text = decode_utf8(&bytes, side)?;
    Ok(text.to_owned())
}

/// Compares the visible text of `original` and `processed`.
///
/// Inequivalence is an `Ok` result; only unreadable files, undecodable
/// bytes and an empty original are errors.
pub fn verify_files(
    original: &Path,
    processed: &Path,
    canonicalizer: &Canonicalizer,
) -> Result<Verification, FileError> {
    let (original_bytes, processed_bytes) = read_pair(original, processed)
        .inspect_err(|err| warn!(error = %err, warning = false, "verify_failure"))?;
    verify_loaded(
        original,
        processed,
        &original_bytes,
        &processed_bytes,
        canonicalizer,
    )
}

/// [`verify_files`] over bytes the caller has already read.
pub(crate) fn verify_loaded(
    original: &Path,
    processed: &Path,
    original_bytes: &[u8],
    processed_bytes: &[u8],
    canonicalizer: &Canonicalizer,
) -> Result<Verification, FileError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "aciss.verify",
        original = %original.display(),
        processed = %processed.display()
    );
    let _guard = span.enter();

    let comparison = canonicalizer.compare_bytes(original_bytes, processed_bytes);
    let elapsed_micros = start.elapsed().as_micros();

    match comparison {
        Ok(comparison) => {
            log_comparison(&comparison, elapsed_micros);
            Ok(Verification {
                original: original.to_path_buf(),
                processed: processed.to_path_buf(),
                comparison,
            })
        }
        Err(err) => {
            warn!(error = %err, warning = err.is_warning(), elapsed_micros, "verify_failure");
            Err(err.into())
        }
    }
}

/// Reads `input`, applies `mode`, writes `output` and checks the written
/// text against the input.
///
/// An input without visible text is still transformed and written; the
/// outcome then carries no comparison.
pub fn transform_file(
    input: &Path,
    output: &Path,
    mode: TransformMode,
    canonicalizer: &Canonicalizer,
) -> Result<TransformOutcome, FileError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "aciss.transform",
        input = %input.display(),
        output = %output.display(),
        mode = %mode
    );
    let _guard = span.enter();

    let result = transform_inner(input, output, mode, canonicalizer);
    let elapsed_micros = start.elapsed().as_micros();
    match &result {
        Ok(outcome) => match &outcome.comparison {
            Some(comparison) => log_comparison(comparison, elapsed_micros),
            None => warn!(elapsed_micros, "transform_empty_baseline"),
        },
        Err(err) => warn!(error = %err, elapsed_micros, "transform_failure"),
    }
    result
}

fn transform_inner(
    input: &Path,
    output: &Path,
    mode: TransformMode,
    canonicalizer: &Canonicalizer,
) -> Result<TransformOutcome, FileError> {
    let source = read_document(input, DocumentSide::Input)?;
    let transformed = mode.apply(&source);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| FileError::io(parent, err))?;
    }
    fs::write(output, &transformed).map_err(|err| FileError::io(output, err))?;

    let comparison = match canonicalizer.compare(&source, &transformed) {
        Ok(comparison) => Some(comparison),
        Err(CanonicalError::EmptyContent) => None,
        Err(err) => return Err(err.into()),
    };

    Ok(TransformOutcome {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        mode,
        comparison,
    })
}

pub(crate) fn read_pair(
    original: &Path,
    processed: &Path,
) -> Result<(Vec<u8>, Vec<u8>), FileError> {
    let original_bytes = fs::read(original).map_err(|err| FileError::io(original, err))?;
    let processed_bytes = fs::read(processed).map_err(|err| FileError::io(processed, err))?;
    Ok((original_bytes, processed_bytes))
}

fn log_comparison(comparison: &ComparisonResult, elapsed_micros: u128) {
    if comparison.equivalent {
        info!(
            original_len = comparison.original_len,
            transformed_len = comparison.transformed_len,
            elapsed_micros,
            "content_preserved"
        );
    } else {
        warn!(
            original_len = comparison.original_len,
            transformed_len = comparison.transformed_len,
            length_delta = comparison.length_delta(),
            divergence_offset = ?comparison.divergence.as_ref().map(|d| d.offset),
            elapsed_micros,
            "content_changed"
        );
    }
}
