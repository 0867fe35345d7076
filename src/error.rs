//! Error types shared by the bibliography, stripping and download pipelines.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A metadata line is not valid JSON or lacks a required field
    #[error("Malformed record ({location}): {reason}")]
    MalformedRecord { location: String, reason: String },

    /// The page-count query failed or returned a non-positive value
    #[error("Page count unavailable for {}: {reason}", path.display())]
    PageCountUnavailable { path: PathBuf, reason: String },

    /// Supplementary material must be a zip archive
    #[error("Unsupported supplementary material '{reference}' for forum {forum_id} (expected .zip)")]
    UnsupportedSupplementaryFormat { forum_id: String, reference: String },

    /// The archive cannot be opened or listed
    #[error("Cannot read archive {}: {source}", path.display())]
    ArchiveRead {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The cleaned archive cannot be written
    #[error("Cannot write archive {}: {source}", path.display())]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A paper file could not be copied into the output directory
    #[error("Cannot copy {} to {} for forum {forum_id}: {source}", from.display(), to.display())]
    Copy {
        forum_id: String,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input or output file of the run cannot be opened
    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Review platform request failed
    #[error("Review platform error: {0}")]
    Platform(String),
}

impl Error {
    pub(crate) fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn file_access(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Platform(e.to_string())
    }
}
