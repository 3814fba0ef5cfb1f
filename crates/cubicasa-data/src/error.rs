// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for dataset acquisition

use cubicasa_model::LoaderError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dataset operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while locating or fetching the dataset
#[derive(Error, Debug)]
pub enum DataError {
    /// File-system failure at a known location
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The download request failed
    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The archive could not be read or unpacked
    #[error("Archive extraction failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The archive was shorter than the server announced
    #[error("Download incomplete: {}", .0.display())]
    Incomplete(PathBuf),

    /// A dataset directory holds no floor-plan files
    #[error("No floor plans found under {}", .0.display())]
    NoFloorPlans(PathBuf),

    /// Loading buildings from the resolved directory failed
    #[error(transparent)]
    Loader(#[from] LoaderError),
}

impl DataError {
    /// Create a new I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}
