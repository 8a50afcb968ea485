use thiserror::Error;

/// Errors raised by the compliance checker.
///
/// A failed check is a report value, never an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ComplianceError {
    #[error("invalid compliance policy: {0}")]
    InvalidPolicy(String),
}
