//! Workspace umbrella crate for the ACISS chapter toolkit.
//!
//! Stitches the three stage crates together over files on disk:
//!
//! - `canonical` reduces markup to visible text and compares two documents
//! - `template` restructures chapters into the ACISS layout
//! - `compliance` checks the result against the template's landmarks
//!
//! The stage crates are pure and log nothing. This crate does the I/O and
//! reports each file operation through `tracing`.
//!
//! ```no_run
//! use aciss::{Canonicalizer, TransformMode, transform_file};
//!
//! let canonicalizer = Canonicalizer::default();
//! let outcome = transform_file(
//!     "input/9-chapter-i-roots.xhtml".as_ref(),
//!     "output/9-chapter-i-roots.xhtml".as_ref(),
//!     TransformMode::Restructure,
//!     &canonicalizer,
//! )?;
//! assert!(outcome.preserved());
//! # Ok::<(), aciss::FileError>(())
//! ```

mod batch;
mod config;
mod error;
mod pipeline;

pub use canonical::{
    CanonicalConfig, CanonicalDocument, CanonicalError, Canonicalizer, ComparisonResult,
    Divergence, DocumentSide, canonicalize, compare,
};
pub use compliance::{
    AcissReport, CompliancePolicy, FileKind, SectionInventory, StylesheetReport, XhtmlReport,
    check_aciss, check_stylesheet, check_xhtml, classify_file_name, inventory_sections,
};
pub use template::{ChapterOutline, TemplateError, TransformMode, clean_part_divider, rebuild, restructure};

pub use crate::batch::{
    BatchEntry, BatchReport, BatchTargets, FilePair, pair_directories, transform_pairs,
    verify_pairs,
};
pub use crate::config::{AcissConfig, ConfigLoadError, TransformYamlConfig};
pub use crate::error::FileError;
pub use crate::pipeline::{
    TransformOutcome, Verification, read_document, transform_file, verify_files,
};
