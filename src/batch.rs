use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use canonical::{Canonicalizer, ComparisonResult, DocumentSide, decode_utf8};
use compliance::{CompliancePolicy, FileKind, check_aciss, check_xhtml, classify_file_name};
use serde::{Deserialize, Serialize};
use tracing::{Level, info, warn};

use crate::config::{ConfigLoadError, TransformYamlConfig};
use crate::error::FileError;
use crate::pipeline::{read_pair, transform_file, verify_loaded};

/// An original file and where its processed version lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePair {
    pub original: PathBuf,
    pub processed: PathBuf,
}

impl FilePair {
    pub fn new(original: impl Into<PathBuf>, processed: impl Into<PathBuf>) -> Self {
        Self {
            original: original.into(),
            processed: processed.into(),
        }
    }

    fn name(&self) -> String {
        self.original
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.original.display().to_string())
    }
}

/// Pairs every `.xhtml` file in `input_dir` with the same name in
/// `output_dir`, sorted by name. Processed files need not exist yet.
pub fn pair_directories(input_dir: &Path, output_dir: &Path) -> Result<Vec<FilePair>, FileError> {
    let entries = fs::read_dir(input_dir).map_err(|err| FileError::io(input_dir, err))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| FileError::io(input_dir, err))?;
        let path = entry.path();
        let is_xhtml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xhtml"));
        if is_xhtml && path.is_file() {
            names.push(entry.file_name());
        }
    }
    names.sort();
    Ok(names
        .into_iter()
        .map(|name| FilePair::new(input_dir.join(&name), output_dir.join(&name)))
        .collect())
}

/// Success thresholds for a batch, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchTargets {
    pub min_preservation_rate: f64,
    pub min_compliance_rate: f64,
}

impl Default for BatchTargets {
    fn default() -> Self {
        Self {
            min_preservation_rate: 95.0,
            min_compliance_rate: 90.0,
        }
    }
}

impl BatchTargets {
    pub(crate) fn validate(&self) -> Result<(), ConfigLoadError> {
        for (name, rate) in [
            ("min_preservation_rate", self.min_preservation_rate),
            ("min_compliance_rate", self.min_compliance_rate),
        ] {
            if !(0.0..=100.0).contains(&rate) {
                return Err(ConfigLoadError::Validation(format!(
                    "targets.{name} must be within 0..=100, got {rate}"
                )));
            }
        }
        Ok(())
    }
}

/// Result of verifying one pair.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub name: String,
    pub kind: FileKind,
    pub preserved: bool,
    pub compliant: bool,
    /// Compliance issues found in the processed file.
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    /// Set when the pair could not be checked at all.
    pub error: Option<String>,
    pub comparison: Option<ComparisonResult>,
}

impl BatchEntry {
    fn new(pair: &FilePair) -> Self {
        let name = pair.name();
        Self {
            kind: classify_file_name(&name),
            name,
            preserved: false,
            compliant: false,
            issues: Vec::new(),
            warnings: Vec::new(),
            error: None,
            comparison: None,
        }
    }
}

/// Per-file results of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn preserved_count(&self) -> usize {
        self.entries.iter().filter(|e| e.preserved).count()
    }

    pub fn compliant_count(&self) -> usize {
        self.entries.iter().filter(|e| e.compliant).count()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.error.is_some()).count()
    }

    pub fn count_of(&self, kind: FileKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Percentage of entries whose text survived; 0 for an empty batch.
    pub fn preservation_rate(&self) -> f64 {
        rate(self.preserved_count(), self.total())
    }

    pub fn compliance_rate(&self) -> f64 {
        rate(self.compliant_count(), self.total())
    }

    pub fn meets_targets(&self, targets: &BatchTargets) -> bool {
        self.preservation_rate() >= targets.min_preservation_rate
            && self.compliance_rate() >= targets.min_compliance_rate
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Verifies every pair for content preservation and compliance.
///
/// Chapters are held to the ACISS policy; every other file only to the
/// XHTML structure checks. A pair that cannot be read is recorded with its
/// error and the run continues.
pub fn verify_pairs(
    pairs: &[FilePair],
    canonicalizer: &Canonicalizer,
    policy: &CompliancePolicy,
) -> BatchReport {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "aciss.batch", pairs = pairs.len());
    let _guard = span.enter();

    let entries = pairs
        .iter()
        .map(|pair| verify_pair(pair, canonicalizer, policy))
        .collect();
    finish_batch(entries, start)
}

/// Transforms every original into its processed path, then verifies the
/// pairs that were written.
///
/// The mode per file comes from [`TransformYamlConfig::mode_for`]. A pair
/// whose transformation fails is recorded with that error and is not
/// verified, so a processed file left over from an earlier run is never
/// checked in its place.
pub fn transform_pairs(
    pairs: &[FilePair],
    transform: &TransformYamlConfig,
    canonicalizer: &Canonicalizer,
    policy: &CompliancePolicy,
) -> BatchReport {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "aciss.batch_transform", pairs = pairs.len());
    let _guard = span.enter();

    let entries = pairs
        .iter()
        .map(|pair| {
            let mode = transform.mode_for(&pair.name(), None);
            match transform_file(&pair.original, &pair.processed, mode, canonicalizer) {
                Ok(_) => verify_pair(pair, canonicalizer, policy),
                Err(err) => {
                    let mut entry = BatchEntry::new(pair);
                    entry.error = Some(format!("transform failed: {err}"));
                    entry
                }
            }
        })
        .collect();
    finish_batch(entries, start)
}

fn finish_batch(entries: Vec<BatchEntry>, start: Instant) -> BatchReport {
    let report = BatchReport { entries };
    info!(
        total = report.total(),
        preserved = report.preserved_count(),
        compliant = report.compliant_count(),
        errors = report.error_count(),
        elapsed_micros = start.elapsed().as_micros(),
        "batch_complete"
    );
    report
}

fn verify_pair(
    pair: &FilePair,
    canonicalizer: &Canonicalizer,
    policy: &CompliancePolicy,
) -> BatchEntry {
    let mut entry = BatchEntry::new(pair);

    let (original, processed) = match read_pair(&pair.original, &pair.processed) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(file = %entry.name, error = %err, "verify_failure");
            entry.error = Some(err.to_string());
            return entry;
        }
    };

    match verify_loaded(
        &pair.original,
        &pair.processed,
        &original,
        &processed,
        canonicalizer,
    ) {
        Ok(verification) => {
            entry.preserved = verification.preserved();
            entry.comparison = Some(verification.comparison);
        }
        Err(err) if err.is_warning() => entry.warnings.push(err.to_string()),
        Err(err) => {
            entry.error = Some(err.to_string());
            return entry;
        }
    }

    match decode_utf8(&processed, DocumentSide::Transformed) {
        Ok(processed) => {
            entry.issues = compliance_issues(entry.kind, processed, policy);
            entry.compliant = entry.issues.is_empty();
        }
        Err(err) => {
            warn!(file = %entry.name, error = %err, "compliance_read_failure");
            entry.error = Some(err.to_string());
        }
    }
    entry
}

fn compliance_issues(kind: FileKind, content: &str, policy: &CompliancePolicy) -> Vec<String> {
    match kind {
        FileKind::Chapter => check_aciss(content, policy).issues(),
        FileKind::PartDivider | FileKind::Other => check_xhtml(content)
            .failures()
            .into_iter()
            .map(|check| format!("Failed XHTML check: {check}"))
            .collect(),
    }
}
