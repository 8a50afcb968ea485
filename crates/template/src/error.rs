use thiserror::Error;

/// Errors raised while selecting a transformation.
///
/// Transformations themselves never fail; only naming one can.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("unknown transform mode '{0}' (expected restructure, rebuild or part-divider)")]
    UnknownMode(String),
}
