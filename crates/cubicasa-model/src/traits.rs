// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for floor-plan loading
//!
//! These traits define the main abstractions for turning a CubiCasa-style
//! directory tree into [`Building`] records.

use crate::{Building, Floor, Result};
use std::path::Path;

/// Progress callback type for long-running operations
///
/// Receives `(phase_name, percent_complete)`.
pub type ProgressCallback = Box<dyn Fn(&str, f32) + Send>;

/// Lazily produced sequence of buildings
///
/// Each call to `next` loads at most one building. Dropping the iterator
/// early is the way to cancel a dataset load.
pub type BuildingIter<'a> = Box<dyn Iterator<Item = Result<Building>> + Send + 'a>;

/// Main loading interface - entry point for parsing floor-plan directories
///
/// # Example
///
/// ```ignore
/// use cubicasa_model::FloorPlanLoader;
///
/// let loader: Box<dyn FloorPlanLoader> = get_loader();
/// for building in loader.load_dataset("CubiCasa5k".as_ref())?.take(10) {
///     let building = building?;
///     println!("{}: {} floors", building.building_id, building.floor_count());
/// }
/// ```
pub trait FloorPlanLoader: Send + Sync {
    /// Parse a single SVG document as a floor
    ///
    /// The returned floor has index 0; only building loads infer an index
    /// from the folder layout.
    fn load_floor(&self, svg_path: &Path) -> Result<Floor>;

    /// Load every floor-plan file below `root` as one building
    ///
    /// # Errors
    /// `LoaderError::DirectoryNotFound` if `root` is not a directory, or the
    /// first document-level failure encountered.
    fn load_building(&self, root: &Path) -> Result<Building>;

    /// Discover all buildings below a dataset root
    ///
    /// Building roots are discovered eagerly; each building is only parsed
    /// when the returned iterator is advanced.
    ///
    /// # Errors
    /// `LoaderError::DirectoryNotFound` if `root` does not exist. Parse
    /// failures surface as `Err` items of the iterator.
    fn load_dataset<'a>(&'a self, root: &Path) -> Result<BuildingIter<'a>>;
}
