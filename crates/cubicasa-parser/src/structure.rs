// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structure resolution - floors, buildings and datasets from a directory tree
//!
//! A building directory holds its `model.svg` files either directly or in
//! per-floor folders named `F<digits>`. A dataset root may nest buildings
//! under any number of category folders; only the immediate parent of each
//! floor-plan file is inspected.

use crate::floor::{parse_floor, FLOOR_PLAN_FILE_NAME};
use cubicasa_model::{Building, LoaderError, ProgressCallback, Result};
use log::debug;
use std::collections::{btree_set, BTreeSet};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Infer a floor index from a folder name
///
/// Matches `F` or `f` followed by one or more ASCII digits and nothing else.
/// Values that overflow `i32` do not match.
pub fn floor_index_from_dir_name(name: &str) -> Option<i32> {
    let digits = name.strip_prefix(['F', 'f'])?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Floor index implied by the folder containing `path`
fn floor_index_of(path: &Path) -> Option<i32> {
    let folder = path.parent()?.file_name()?.to_str()?;
    floor_index_from_dir_name(folder)
}

/// Recursively find every floor-plan file below `root`
///
/// Entries are visited in file-name order, so the result is deterministic.
pub fn find_floor_plans(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| LoaderError::Walk(e.to_string()))?;
        if entry.file_type().is_file() && entry.file_name() == FLOOR_PLAN_FILE_NAME {
            files.push(entry.into_path());
        }
    }

    debug!("found {} floor plans under {}", files.len(), root.display());
    Ok(files)
}

/// Leaf name of a building directory
fn building_id(root: &Path) -> Result<String> {
    if let Some(name) = root.file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }

    // `.` and `..` have no file name of their own
    let canonical = root.canonicalize().map_err(|e| LoaderError::io(root, e))?;
    Ok(canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default())
}

/// Load every floor below `root` as one building
///
/// Floors in an `F<n>` folder get index `n`; all others keep index 0.
/// Floors are ordered by index; ties keep discovery order.
///
/// # Errors
/// `LoaderError::DirectoryNotFound` if `root` is not an existing directory.
/// The first floor that fails to parse aborts the whole building.
pub fn load_building(root: &Path) -> Result<Building> {
    if !root.is_dir() {
        return Err(LoaderError::not_found(root));
    }

    let id = building_id(root)?;
    let floors = find_floor_plans(root)?
        .iter()
        .map(|path| {
            let mut floor = parse_floor(path)?;
            if let Some(index) = floor_index_of(path) {
                floor.floor_index = index;
            }
            Ok(floor)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("loaded building {id} with {} floors", floors.len());
    Ok(Building::new(id, floors))
}

/// Building root implied by one floor-plan file
///
/// The containing folder, or its parent when the folder is a floor folder.
fn building_root_of(floor_plan: &Path) -> Option<&Path> {
    let folder = floor_plan.parent()?;
    if floor_index_of(floor_plan).is_some() {
        folder.parent()
    } else {
        Some(folder)
    }
}

/// Find the unique building roots below a dataset root
///
/// Roots are canonicalized, which both deduplicates them and orders them by
/// absolute path.
pub fn discover_building_roots(root: &Path) -> Result<BTreeSet<PathBuf>> {
    let mut roots = BTreeSet::new();

    for floor_plan in find_floor_plans(root)? {
        if let Some(building) = building_root_of(&floor_plan) {
            let canonical = building
                .canonicalize()
                .map_err(|e| LoaderError::io(building, e))?;
            if roots.insert(canonical) {
                debug!("building root {}", building.display());
            }
        }
    }

    Ok(roots)
}

/// Discover all buildings below `root`
///
/// The directory walk happens here; buildings are parsed one at a time as
/// the returned iterator is advanced.
///
/// # Errors
/// `LoaderError::DirectoryNotFound` if `root` does not exist.
pub fn load_dataset(root: &Path) -> Result<DatasetIter> {
    if !root.exists() {
        return Err(LoaderError::not_found(root));
    }

    let roots = discover_building_roots(root)?;
    debug!("dataset {} has {} buildings", root.display(), roots.len());
    Ok(DatasetIter::new(roots))
}

/// Lazy, forward-only sequence of buildings
///
/// Each call to `next` performs exactly one building load. Dropping the
/// iterator cancels the rest of the load; no file handles outlive a call.
/// After an error is yielded the iterator is exhausted.
pub struct DatasetIter {
    roots: btree_set::IntoIter<PathBuf>,
    total: usize,
    loaded: usize,
    failed: bool,
    on_progress: Option<ProgressCallback>,
}

impl DatasetIter {
    fn new(roots: BTreeSet<PathBuf>) -> Self {
        Self {
            total: roots.len(),
            roots: roots.into_iter(),
            loaded: 0,
            failed: false,
            on_progress: None,
        }
    }

    /// Report `("Loading building", percent)` after each building
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Number of building roots found by the directory walk
    pub fn building_count(&self) -> usize {
        self.total
    }
}

impl Iterator for DatasetIter {
    type Item = Result<Building>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let root = self.roots.next()?;
        let result = load_building(&root);
        self.loaded += 1;

        match &result {
            Ok(_) => {
                if let Some(callback) = &self.on_progress {
                    let percent = self.loaded as f32 / self.total as f32 * 100.0;
                    callback("Loading building", percent);
                }
            }
            Err(_) => self.failed = true,
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.total - self.loaded))
        }
    }
}

impl FusedIterator for DatasetIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PLAN: &str =
        r#"<svg viewBox="0 0 100 100"><g id="Wall"><path d="M 0 0 L 10 0 L 10 10 L 0 10 Z"/></g></svg>"#;

    fn write_plan(root: &Path, rel: &str) -> PathBuf {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(FLOOR_PLAN_FILE_NAME);
        fs::write(&path, PLAN).unwrap();
        path
    }

    #[test]
    fn test_floor_index_from_dir_name() {
        assert_eq!(floor_index_from_dir_name("F1"), Some(1));
        assert_eq!(floor_index_from_dir_name("f2"), Some(2));
        assert_eq!(floor_index_from_dir_name("F007"), Some(7));
        assert_eq!(floor_index_from_dir_name("F"), None);
        assert_eq!(floor_index_from_dir_name("F1a"), None);
        assert_eq!(floor_index_from_dir_name("F-1"), None);
        assert_eq!(floor_index_from_dir_name("F+1"), None);
        assert_eq!(floor_index_from_dir_name("Floor1"), None);
        assert_eq!(floor_index_from_dir_name("G1"), None);
        assert_eq!(floor_index_from_dir_name("F99999999999"), None);
        assert_eq!(floor_index_from_dir_name(""), None);
    }

    #[test]
    fn test_building_root_of() {
        let flat = Path::new("data/1002/model.svg");
        assert_eq!(building_root_of(flat), Some(Path::new("data/1002")));

        let nested = Path::new("data/2001/F2/model.svg");
        assert_eq!(building_root_of(nested), Some(Path::new("data/2001")));
    }

    #[test]
    fn test_find_floor_plans_sorted() {
        let dir = TempDir::new().unwrap();
        write_plan(dir.path(), "b/F2");
        write_plan(dir.path(), "a");
        write_plan(dir.path(), "b/F1");
        fs::write(dir.path().join("a/Model.svg"), PLAN).unwrap();
        fs::write(dir.path().join("a/notes.txt"), "x").unwrap();

        let files = find_floor_plans(dir.path()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/model.svg"),
                PathBuf::from("b/F1/model.svg"),
                PathBuf::from("b/F2/model.svg"),
            ]
        );
    }

    #[test]
    fn test_load_building_indexes_floors() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("3004");
        write_plan(&root, "F2");
        write_plan(&root, "F1");
        write_plan(&root, "");

        let building = load_building(&root).unwrap();
        assert_eq!(building.building_id, "3004");
        let indices: Vec<_> = building.floors.iter().map(|f| f.floor_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(building.entity_count(), 3);
    }

    #[test]
    fn test_load_building_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = load_building(&dir.path().join("nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_building_on_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let file = write_plan(dir.path(), "x");
        assert!(load_building(&file).unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_building_without_plans() {
        let dir = TempDir::new().unwrap();
        let building = load_building(dir.path()).unwrap();
        assert_eq!(building.floor_count(), 0);
    }

    #[test]
    fn test_malformed_floor_aborts_building() {
        let dir = TempDir::new().unwrap();
        write_plan(dir.path(), "F1");
        fs::create_dir_all(dir.path().join("F2")).unwrap();
        fs::write(dir.path().join("F2").join(FLOOR_PLAN_FILE_NAME), "<svg>").unwrap();

        let err = load_building(dir.path()).unwrap_err();
        assert!(matches!(err, LoaderError::Xml { .. }));
    }

    #[test]
    fn test_dataset_is_lazy_and_fused() {
        let dir = TempDir::new().unwrap();
        write_plan(dir.path(), "a/1");
        write_plan(dir.path(), "b/2");
        fs::create_dir_all(dir.path().join("b/3")).unwrap();
        fs::write(dir.path().join("b/3").join(FLOOR_PLAN_FILE_NAME), "<svg").unwrap();
        write_plan(dir.path(), "c/4");

        let mut dataset = load_dataset(dir.path()).unwrap();
        assert_eq!(dataset.building_count(), 4);
        assert_eq!(dataset.size_hint(), (0, Some(4)));

        assert_eq!(dataset.next().unwrap().unwrap().building_id, "1");
        assert_eq!(dataset.next().unwrap().unwrap().building_id, "2");
        assert!(dataset.next().unwrap().is_err());
        assert!(dataset.next().is_none());
        assert!(dataset.next().is_none());
    }

    #[test]
    fn test_dataset_progress() {
        use std::sync::{Arc, Mutex};

        let dir = TempDir::new().unwrap();
        write_plan(dir.path(), "x/1");
        write_plan(dir.path(), "x/2");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let dataset = load_dataset(dir.path())
            .unwrap()
            .on_progress(Box::new(move |phase, percent| {
                sink.lock().unwrap().push((phase.to_string(), percent));
            }));

        assert_eq!(dataset.filter(|b| b.is_ok()).count(), 2);
        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("Loading building".to_string(), 50.0),
                ("Loading building".to_string(), 100.0),
            ]
        );
    }
}
