//! Canonical text layer for XHTML chapters.
//!
//! Reduces a markup document to the text a reader actually sees, and
//! decides whether a restructuring of that document preserved it.
//!
//! ## What we do
//!
//! - Strip comments, the XML prolog and DOCTYPE
//! - Strip every remaining tag (lexically; see [`strip_tags`])
//! - Decode character references from a configurable table
//! - Collapse whitespace to single spaces and trim
//! - Compare two canonical texts for exact equality, locating the first
//!   divergence when the lengths are close
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no globals that change behaviour. Same text and same
//! [`CanonicalConfig`] give the same canonical text on any machine, and
//! canonicalizing tag-free, reference-free text is a no-op beyond whitespace
//! collapse.
//!
//! ## Example
//!
//! ```rust
//! use canonical::compare;
//!
//! let result = compare(
//!     "<div>A<br/>B</div>",
//!     "<section><p>A</p><p>B</p></section>",
//! )
//! .unwrap();
//! assert!(result.equivalent);
//! ```

mod compare;
mod config;
mod document;
mod entity;
mod error;
mod hash;
mod markup;
mod pipeline;
mod whitespace;

pub use crate::compare::{locate_divergence, ComparisonResult, Divergence};
pub use crate::config::{default_entities, CanonicalConfig, DEFAULT_ENTITIES};
pub use crate::document::CanonicalDocument;
pub use crate::entity::EntityTable;
pub use crate::error::{decode_utf8, CanonicalError, DocumentSide};
pub use crate::hash::hash_canonical_bytes;
pub use crate::markup::{strip_declarations, strip_tags};
pub use crate::pipeline::{canonicalize, compare, Canonicalizer};
pub use crate::whitespace::collapse_whitespace;
