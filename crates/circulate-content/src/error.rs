//! Content error type.

use std::path::PathBuf;

/// Error returned when content cannot be scanned or parsed.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A configured content directory does not exist.
    #[error("{what} directory not found: {}", .path.display())]
    MissingDirectory {
        /// Which directory (e.g. "Pages").
        what: &'static str,
        /// Expected location.
        path: PathBuf,
    },
    /// A file or directory could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Front matter is not valid YAML or not a mapping.
    #[error("Invalid front matter in {}: {message}", .path.display())]
    FrontMatter {
        /// Document file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// A document file does not live under its base directory.
    #[error("{} is not inside {}", .path.display(), .base.display())]
    OutsideBase {
        /// Document file.
        path: PathBuf,
        /// Expected base directory.
        base: PathBuf,
    },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
