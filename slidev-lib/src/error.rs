//! Defines custom error types for the library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type returned when provisioning assets or rendering a presentation fails.
pub enum SlidevError {
    #[error("Bundled asset directory not found: {}", .0.display())]
    AssetsMissing(PathBuf),

    #[error("Failed to read markdown file: {}", path.display())]
    ReadMarkdown {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read template file: {}", path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write cache stamp: {0}")]
    Stamp(String),

    #[error("Invalid window geometry: {0}")]
    InvalidGeometry(String),
}

impl SlidevError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SlidevError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for SlidevError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        SlidevError::Io {
            path,
            source: err.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlidevError>;
