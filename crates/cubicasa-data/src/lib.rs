// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CubiCasa Data - dataset location and acquisition
//!
//! Finds a local copy of the CubiCasa5k dataset, or downloads and unpacks
//! the public archive when none exists. Lookup order:
//!
//! 1. an explicit path supplied by the caller
//! 2. `~/.cubicasa`
//! 3. `./CubiCasaData`
//! 4. `./CubiCasa5k`
//!
//! Cached directories only count once they carry the `.dataset_ready`
//! marker and at least one `model.svg`.
//!
//! # Example
//!
//! ```ignore
//! use cubicasa_data::{load_layouts, DataManager};
//!
//! let manager = DataManager::from_env()?;
//! let buildings = load_layouts(&manager, None, Some(10), None)?;
//! println!("Loaded {} buildings", buildings.len());
//! ```

mod config;
mod error;
mod manager;

pub use config::{
    DataConfig, ARCHIVE_NAME, COMPLETION_MARKER, DATASET_URL, DOWNLOAD_TIMEOUT, LEGACY_DIR_NAME,
    USER_CACHE_DIR_NAME, WORKING_CACHE_DIR_NAME,
};
pub use error::{DataError, Result};
pub use manager::{contains_floor_plans, is_populated, DataManager};

use cubicasa_model::{Building, ProgressCallback};
use log::debug;
use std::path::Path;

/// Resolve the dataset and load up to `limit` buildings from it
///
/// `progress` receives download phases (when a download is needed) and
/// `("Loading building", percent)` after each building.
pub fn load_layouts(
    manager: &DataManager,
    explicit: Option<&Path>,
    limit: Option<usize>,
    progress: Option<ProgressCallback>,
) -> Result<Vec<Building>> {
    let root = manager.resolve_with_progress(explicit, progress.as_ref())?;
    let dataset = cubicasa_parser::load_dataset(&root)?;

    let available = dataset.building_count();
    let total = limit.map_or(available, |limit| limit.min(available));
    debug!("loading {total} of {available} buildings from {}", root.display());

    let mut buildings = Vec::with_capacity(total);
    for building in dataset.take(total) {
        buildings.push(building?);
        if let Some(callback) = &progress {
            callback(
                "Loading building",
                buildings.len() as f32 / total as f32 * 100.0,
            );
        }
    }
    Ok(buildings)
}
