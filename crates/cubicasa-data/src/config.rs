// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dataset locations and download settings

use crate::error::{DataError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public archive of the CubiCasa5k dataset
pub const DATASET_URL: &str = "https://zenodo.org/records/2613548/files/cubicasa5k.zip?download=1";

/// File name the archive is downloaded to
pub const ARCHIVE_NAME: &str = "cubicasa5k.zip";

/// Marker written once a download has been extracted and validated
pub const COMPLETION_MARKER: &str = ".dataset_ready";

/// User-level cache, relative to the home directory
pub const USER_CACHE_DIR_NAME: &str = ".cubicasa";

/// Working-directory cache
pub const WORKING_CACHE_DIR_NAME: &str = "CubiCasaData";

/// Legacy working-directory location
pub const LEGACY_DIR_NAME: &str = "CubiCasa5k";

/// Timeout for the whole archive download
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Where to look for the dataset and how to fetch it
///
/// Every location is explicit, so tests can point a manager at a temporary
/// directory without touching the real home or working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataConfig {
    /// `~/.cubicasa`, absent when there is no home directory
    pub user_cache_dir: Option<PathBuf>,
    /// `./CubiCasaData`
    pub working_cache_dir: PathBuf,
    /// `./CubiCasa5k`
    pub legacy_dir: PathBuf,
    /// Archive URL
    pub dataset_url: String,
    /// Local archive file name
    pub archive_name: String,
    /// Download timeout
    pub timeout: Duration,
}

impl DataConfig {
    /// Defaults relative to the current home and working directories
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| DataError::io(".", e))?;
        let mut config = Self::rooted_at(&cwd);
        config.user_cache_dir = dirs::home_dir().map(|home| home.join(USER_CACHE_DIR_NAME));
        Ok(config)
    }

    /// All locations below one directory
    pub fn rooted_at(dir: &Path) -> Self {
        Self {
            user_cache_dir: Some(dir.join(USER_CACHE_DIR_NAME)),
            working_cache_dir: dir.join(WORKING_CACHE_DIR_NAME),
            legacy_dir: dir.join(LEGACY_DIR_NAME),
            dataset_url: DATASET_URL.to_string(),
            archive_name: ARCHIVE_NAME.to_string(),
            timeout: DOWNLOAD_TIMEOUT,
        }
    }

    /// Set the archive URL
    pub fn with_dataset_url(mut self, url: impl Into<String>) -> Self {
        self.dataset_url = url.into();
        self
    }

    /// Cache locations in resolution order
    pub fn candidates(&self) -> impl Iterator<Item = &Path> + '_ {
        self.user_cache_dir
            .as_deref()
            .into_iter()
            .chain([self.working_cache_dir.as_path(), self.legacy_dir.as_path()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_at() {
        let config = DataConfig::rooted_at(Path::new("/tmp/x"));
        let candidates: Vec<_> = config.candidates().collect();
        assert_eq!(
            candidates,
            vec![
                Path::new("/tmp/x/.cubicasa"),
                Path::new("/tmp/x/CubiCasaData"),
                Path::new("/tmp/x/CubiCasa5k"),
            ]
        );
        assert_eq!(config.timeout, Duration::from_secs(3600));
        assert_eq!(config.archive_name, "cubicasa5k.zip");
    }

    #[test]
    fn test_candidates_without_home() {
        let mut config = DataConfig::rooted_at(Path::new("w"));
        config.user_cache_dir = None;
        assert_eq!(config.candidates().count(), 2);
    }

    #[test]
    fn test_from_env_uses_working_directory() {
        let config = DataConfig::from_env().unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.working_cache_dir, cwd.join("CubiCasaData"));
        assert_eq!(config.legacy_dir, cwd.join("CubiCasa5k"));
        assert_eq!(config.dataset_url, DATASET_URL);
    }
}
