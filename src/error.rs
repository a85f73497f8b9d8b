//! Error type for instance and solution I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading instances, writing solutions or running the
/// external checker. Capacity limits and unknown distances are handled by
/// the tour builder and never surface here.
#[derive(Debug, Error)]
pub enum PickingError {
    /// Filesystem failure on a given path.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// JSON (de)serialization failure.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// A required instance section is absent.
    #[error("instance has no `{0}` section")]
    MissingSection(&'static str),
    /// A line could not be parsed.
    #[error("line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number in the source file.
        line: usize,
        /// What went wrong.
        reason: String,
    },
    /// A value is present but unusable.
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// What went wrong.
        reason: String,
    },
    /// A solution without tours cannot be written.
    #[error("no tour to export")]
    EmptySolution,
    /// The external checker could not be launched.
    #[error("cannot launch checker `{command}`: {source}")]
    Checker {
        /// Program that failed to start.
        command: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl PickingError {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PickingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = PickingError::MalformedLine {
            line: 4,
            reason: "expected integer, found `x`".to_string(),
        };
        assert_eq!(e.to_string(), "line 4: expected integer, found `x`");
        assert_eq!(
            PickingError::MissingSection("//DepartingDepot").to_string(),
            "instance has no `//DepartingDepot` section"
        );
    }

    #[test]
    fn test_io_keeps_path() {
        let e = PickingError::io(
            "instances/a.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(e.to_string().starts_with("cannot access instances/a.txt"));
    }
}
