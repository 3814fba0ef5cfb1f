// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dataset resolution, download and extraction

use crate::config::{DataConfig, COMPLETION_MARKER};
use crate::error::{DataError, Result};
use cubicasa_model::ProgressCallback;
use cubicasa_parser::FLOOR_PLAN_FILE_NAME;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

const CHUNK_SIZE: usize = 64 * 1024;

/// Whether any floor-plan file exists below `dir`
pub fn contains_floor_plans(dir: &Path) -> bool {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_type().is_file() && entry.file_name() == FLOOR_PLAN_FILE_NAME)
}

/// Whether `dir` holds a completed download
///
/// Requires the completion marker and at least one floor-plan file.
pub fn is_populated(dir: &Path) -> bool {
    dir.is_dir() && dir.join(COMPLETION_MARKER).is_file() && contains_floor_plans(dir)
}

/// Locates the dataset on disk, downloading it when no copy exists
#[derive(Clone, Debug)]
pub struct DataManager {
    config: DataConfig,
}

impl DataManager {
    /// Create a manager for the given locations
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    /// Manager using the default home and working-directory locations
    pub fn from_env() -> Result<Self> {
        DataConfig::from_env().map(Self::new)
    }

    /// Get the configuration
    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// First populated cache location, if any
    pub fn find_populated(&self) -> Option<PathBuf> {
        self.config
            .candidates()
            .find(|dir| is_populated(dir))
            .map(Path::to_path_buf)
    }

    /// Where a fresh download goes
    ///
    /// The user cache when that directory already exists, otherwise the
    /// working-directory cache.
    pub fn download_target(&self) -> PathBuf {
        match &self.config.user_cache_dir {
            Some(dir) if dir.is_dir() => dir.clone(),
            _ => self.config.working_cache_dir.clone(),
        }
    }

    /// Directory [`resolve`](Self::resolve) would return, without downloading
    pub fn locate(&self) -> PathBuf {
        self.find_populated()
            .unwrap_or_else(|| self.download_target())
    }

    /// Resolve a local dataset directory
    ///
    /// Order: `explicit` (must contain floor plans, no marker needed), then
    /// the populated user cache, working cache and legacy directory, and
    /// finally a fresh download into [`download_target`](Self::download_target).
    pub fn resolve(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        self.resolve_with_progress(explicit, None)
    }

    /// [`resolve`](Self::resolve), reporting download progress
    pub fn resolve_with_progress(
        &self,
        explicit: Option<&Path>,
        progress: Option<&ProgressCallback>,
    ) -> Result<PathBuf> {
        if let Some(dir) = explicit {
            if !contains_floor_plans(dir) {
                return Err(DataError::NoFloorPlans(dir.to_path_buf()));
            }
            debug!("using explicit dataset path {}", dir.display());
            return Ok(dir.to_path_buf());
        }

        if let Some(dir) = self.find_populated() {
            info!("Data found at {}", dir.display());
            return Ok(dir);
        }

        let target = self.download_target();
        self.download_and_extract(&target, progress)?;
        Ok(target)
    }

    /// Download the archive into `target`, extract it and mark it complete
    ///
    /// The archive file is always removed afterwards. On failure the
    /// completion marker is removed as well.
    pub fn download_and_extract(
        &self,
        target: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<()> {
        fs::create_dir_all(target).map_err(|e| DataError::io(target, e))?;
        let archive = target.join(&self.config.archive_name);

        info!("Dataset not found. Downloading to {}", archive.display());
        let result = self
            .fetch(&archive, progress)
            .and_then(|()| self.install_archive(&archive, target, progress));
        if let Err(e) = &result {
            warn!("Error downloading or extracting dataset: {e}");
        }

        if result.is_err() {
            remove_marker(target);
        }
        if archive.exists() {
            if let Err(e) = fs::remove_file(&archive) {
                warn!("failed to remove {}: {e}", archive.display());
            }
        }
        result
    }

    /// Extract a local archive into `target` and mark it complete
    ///
    /// Fails with [`DataError::NoFloorPlans`] when the extracted tree holds
    /// no floor plans. On failure the completion marker is removed.
    pub fn install_archive(
        &self,
        archive: &Path,
        target: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<()> {
        let result = extract(archive, target, progress).and_then(|()| {
            if !contains_floor_plans(target) {
                return Err(DataError::NoFloorPlans(target.to_path_buf()));
            }
            write_marker(target)
        });

        if let Err(e) = &result {
            warn!("Error extracting dataset: {e}");
            remove_marker(target);
        } else {
            info!("Extraction complete to {}", target.display());
        }
        result
    }

    /// Stream the archive to disk
    fn fetch(&self, archive: &Path, progress: Option<&ProgressCallback>) -> Result<()> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()?;
        let mut response = client
            .get(&self.config.dataset_url)
            .send()?
            .error_for_status()?;
        let total = response.content_length();

        let file = File::create(archive).map_err(|e| DataError::io(archive, e))?;
        let mut writer = BufWriter::new(file);
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut written = 0u64;
        let mut last_percent = -1i32;

        loop {
            let n = response
                .read(&mut buf)
                .map_err(|e| DataError::io(archive, e))?;
            if n == 0 {
                break;
            }
            writer
                .write_all(&buf[..n])
                .map_err(|e| DataError::io(archive, e))?;
            written += n as u64;

            if let (Some(callback), Some(total)) = (progress, total.filter(|t| *t > 0)) {
                let percent = (written as f64 / total as f64 * 100.0) as i32;
                if percent != last_percent {
                    last_percent = percent;
                    callback("Downloading", percent as f32);
                }
            }
        }
        writer.flush().map_err(|e| DataError::io(archive, e))?;

        if total.is_some_and(|total| written < total) {
            return Err(DataError::Incomplete(archive.to_path_buf()));
        }
        info!("Download complete ({written} bytes)");
        Ok(())
    }
}

fn extract(archive: &Path, target: &Path, progress: Option<&ProgressCallback>) -> Result<()> {
    if let Some(callback) = progress {
        callback("Extracting", 0.0);
    }

    let file = File::open(archive).map_err(|e| DataError::io(archive, e))?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))?;
    debug!("extracting {} entries to {}", zip.len(), target.display());
    zip.extract(target)?;

    if let Some(callback) = progress {
        callback("Extracting", 100.0);
    }
    Ok(())
}

fn remove_marker(target: &Path) {
    let marker = target.join(COMPLETION_MARKER);
    if marker.exists() {
        if let Err(e) = fs::remove_file(&marker) {
            warn!("failed to remove {}: {e}", marker.display());
        }
    }
}

fn write_marker(target: &Path) -> Result<()> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let marker = target.join(COMPLETION_MARKER);
    fs::write(&marker, stamp.to_string()).map_err(|e| DataError::io(marker, e))
}
