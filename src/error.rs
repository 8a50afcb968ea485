use std::io;
use std::path::PathBuf;

use canonical::CanonicalError;
use thiserror::Error;

/// Errors that can occur while processing one file.
///
/// Each error belongs to a single file; batch runs record it against that
/// file and move on.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Canonical(#[from] CanonicalError),
}

impl FileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the file could be read but gave no comparison baseline.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Canonical(err) if err.is_warning())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_path() {
        let err = FileError::io(
            "missing/chapter.xhtml",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "failed to access missing/chapter.xhtml: not found");
        assert!(!err.is_warning());
    }

    #[test]
    fn empty_baseline_is_a_warning() {
        let err = FileError::from(CanonicalError::EmptyContent);
        assert!(err.is_warning());
    }
}
