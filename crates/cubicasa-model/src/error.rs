// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for floor-plan loading operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Errors that can occur while loading floor plans
///
/// Only structural and document-level failures are represented here.
/// Malformed path data, unknown element ids and unreadable scale files are
/// absorbed by the parser and never surface as errors.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The building or dataset root does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The floor-plan document is not well-formed XML
    #[error("Malformed SVG document {}: {message}", path.display())]
    Xml { path: PathBuf, message: String },

    /// A floor-plan file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed part way through
    #[error("Directory walk failed: {0}")]
    Walk(String),
}

impl LoaderError {
    /// Create a new not-found error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        LoaderError::DirectoryNotFound(path.into())
    }

    /// Create a new XML error for the given document
    pub fn xml(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        LoaderError::Xml {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a new I/O error for the given file
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoaderError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is the structural "root does not exist" failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoaderError::DirectoryNotFound(_))
    }
}
