// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CubiCasa Parser - floor-plan SVG loader
//!
//! This crate turns CubiCasa5k-style directory trees of `model.svg` files
//! into [`Building`] records. It implements the traits defined in
//! `cubicasa-model` for a clean abstraction.
//!
//! # Features
//!
//! - **Lenient path tokenization** using `nom` combinators
//! - **Polygon rings** built on `geo`
//! - **Floor-index inference** from `F<n>` folder names
//! - **Lazy dataset loading** - one building parsed per iterator step
//! - **Progress reporting** for large datasets
//!
//! # Example
//!
//! ```ignore
//! use cubicasa_parser::CubiCasaLoader;
//! use cubicasa_model::{EntityKind, FloorPlanLoader};
//!
//! let loader = CubiCasaLoader::new();
//! for building in loader.load_dataset("CubiCasa5k".as_ref())?.take(5) {
//!     let building = building?;
//!     for floor in &building.floors {
//!         let walls = floor.entities_of_kind(EntityKind::Wall).count();
//!         println!("{} F{}: {walls} walls", building.building_id, floor.floor_index);
//!     }
//! }
//! ```

mod classifier;
mod floor;
mod polygon;
mod structure;
mod tokenizer;

pub use classifier::{EntityClassifier, CLASSIFICATION_RULES};
pub use floor::{
    parse_floor, parse_floor_str, read_scale_annotation, FLOOR_PLAN_FILE_NAME, SCALE_FILE_NAME,
};
pub use polygon::{parse_path_data, PolygonBuilder, MIN_RING_COORDINATES};
pub use structure::{
    discover_building_roots, find_floor_plans, floor_index_from_dir_name, DatasetIter,
};
pub use tokenizer::{parse_number, PathCommand, PathTokenizer};

use cubicasa_model::{
    Building, BuildingIter, Floor, FloorPlanLoader, ProgressCallback, Result,
};
use std::path::Path;

/// Main loader implementing `FloorPlanLoader` trait
///
/// This is the entry point for loading floor plans. It is stateless; every
/// call reads the file system afresh and nothing is cached between calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct CubiCasaLoader;

impl CubiCasaLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self
    }

    /// Discover all buildings below `root`, reporting progress per building
    pub fn load_dataset_with_progress(
        &self,
        root: &Path,
        on_progress: ProgressCallback,
    ) -> Result<DatasetIter> {
        structure::load_dataset(root).map(|iter| iter.on_progress(on_progress))
    }
}

impl FloorPlanLoader for CubiCasaLoader {
    fn load_floor(&self, svg_path: &Path) -> Result<Floor> {
        parse_floor(svg_path)
    }

    fn load_building(&self, root: &Path) -> Result<Building> {
        structure::load_building(root)
    }

    fn load_dataset<'a>(&'a self, root: &Path) -> Result<BuildingIter<'a>> {
        structure::load_dataset(root).map(|iter| Box::new(iter) as BuildingIter<'a>)
    }
}

/// Quick load of a single floor-plan document
pub fn load_floor(svg_path: impl AsRef<Path>) -> Result<Floor> {
    parse_floor(svg_path.as_ref())
}

/// Quick load of one building directory
pub fn load_building(root: impl AsRef<Path>) -> Result<Building> {
    structure::load_building(root.as_ref())
}

/// Lazily load every building below a dataset root
pub fn load_dataset(root: impl AsRef<Path>) -> Result<DatasetIter> {
    structure::load_dataset(root.as_ref())
}

/// Load a dataset with progress reporting
pub fn load_dataset_with_progress(
    root: impl AsRef<Path>,
    on_progress: impl Fn(&str, f32) + Send + 'static,
) -> Result<DatasetIter> {
    CubiCasaLoader::new().load_dataset_with_progress(root.as_ref(), Box::new(on_progress))
}
