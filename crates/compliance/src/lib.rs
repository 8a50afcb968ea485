//! Compliance checks for ACISS chapters.
//!
//! Every check is a pure function of the document text and a
//! [`CompliancePolicy`]. Checks report; they never fail. A document that
//! misses a landmark yields a report listing it.
//!
//! ```rust
//! use compliance::{check_aciss, CompliancePolicy};
//!
//! let report = check_aciss("<p>plain</p>", &CompliancePolicy::default());
//! assert!(!report.is_compliant());
//! assert!(report.issues().iter().any(|i| i.contains("title-stack")));
//! ```

mod aciss;
mod error;
mod file_kind;
mod inventory;
mod policy;
mod stylesheet;
mod xhtml;

pub use crate::aciss::{check_aciss, AcissReport};
pub use crate::error::ComplianceError;
pub use crate::file_kind::{classify_file_name, FileKind};
pub use crate::inventory::{inventory_sections, SectionInventory};
pub use crate::policy::{CompliancePolicy, RequiredElement, SectionMarker};
pub use crate::stylesheet::{check_stylesheet, StylesheetReport};
pub use crate::xhtml::{check_xhtml, XhtmlReport};
