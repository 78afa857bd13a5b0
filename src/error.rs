//! Error types for filesystem-backed path operations
//!
//! Parsing and the pure path algebra never fail; errors exist only at the
//! capability boundary where real I/O happens.

use std::io;

use thiserror::Error;

use crate::Path;

/// The error type for capability calls that touch the filesystem
#[derive(Error, Debug)]
pub enum Error {
    /// The path does not exist
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: Path,
    },

    /// The path exists but access to it was denied
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be accessed.
        path: Path,
    },

    /// A directory operation was attempted on a non-directory
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: Path,
    },

    /// The path already exists and the operation requires that it does not
    #[error("already exists: {path}")]
    AlreadyExists {
        /// The path that already exists.
        path: Path,
    },

    /// Any other I/O failure
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path the failing operation was applied to.
        path: Path,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Classify an `std::io::Error` for `path` into the crate taxonomy
    ///
    /// Recognized `ErrorKind`s map to their dedicated variants; everything
    /// else falls through to [`Error::Io`].
    ///
    /// # Examples
    /// ```
    /// use path_kit::{Error, Path};
    ///
    /// let io = std::io::Error::from(std::io::ErrorKind::NotFound);
    /// let err = Error::io(&Path::new("/missing"), io);
    /// assert!(err.is_not_found());
    /// ```
    pub fn io(path: &Path, source: io::Error) -> Self {
        let path = path.clone();
        match source.kind() {
            io::ErrorKind::NotFound => Error::NotFound { path },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied { path },
            io::ErrorKind::NotADirectory => Error::NotADirectory { path },
            io::ErrorKind::AlreadyExists => Error::AlreadyExists { path },
            _ => Error::Io { path, source },
        }
    }

    /// Check if this error indicates a missing path
    ///
    /// # Examples
    /// ```
    /// use path_kit::{Error, Path};
    ///
    /// let err = Error::NotFound { path: Path::new("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this error is permission-related
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied { .. })
    }
}

/// Result type for filesystem-backed path operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_kind_classification() {
        let path = Path::new("/some/where");

        let err = Error::io(&path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::NotFound { .. }));

        let err = Error::io(&path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::PermissionDenied { .. }));

        let err = Error::io(&path, io::Error::from(io::ErrorKind::NotADirectory));
        assert!(matches!(err, Error::NotADirectory { .. }));

        let err = Error::io(&path, io::Error::from(io::ErrorKind::AlreadyExists));
        assert!(matches!(err, Error::AlreadyExists { .. }));

        let err = Error::io(&path, io::Error::from(io::ErrorKind::TimedOut));
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_display_includes_path() {
        let err = Error::NotFound {
            path: Path::new("/a/b"),
        };
        let display = format!("{err}");
        assert!(display.contains("not found"));
        assert!(display.contains("/a/b"));
    }

    #[test]
    fn test_predicates() {
        let not_found = Error::NotFound {
            path: Path::new("x"),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_permission_denied());

        let denied = Error::PermissionDenied {
            path: Path::new("x"),
        };
        assert!(denied.is_permission_denied());
        assert!(!denied.is_not_found());
    }
}
