// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor-plan data representation
//!
//! All geometry is in raw pixel coordinates of the source SVG: origin at the
//! top-left corner, y increasing downward.

use geo::{Area, Coord, Polygon};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// An (x, y) point in pixel space
pub type Coordinate = Coord<f64>;

/// Kind of a floor-plan entity
///
/// Derived from the SVG group or element id. `Undefined` is only an
/// intermediate classification result; entities of that kind are never
/// added to a [`Floor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Wall,
    Room,
    Window,
    Door,
    Stairs,
    Railing,
    Icon,
    Undefined,
}

impl EntityKind {
    /// All kinds that can appear on a floor
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Wall,
            EntityKind::Room,
            EntityKind::Window,
            EntityKind::Door,
            EntityKind::Stairs,
            EntityKind::Railing,
            EntityKind::Icon,
        ]
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Wall => "Wall",
            EntityKind::Room => "Room",
            EntityKind::Window => "Window",
            EntityKind::Door => "Door",
            EntityKind::Stairs => "Stairs",
            EntityKind::Railing => "Railing",
            EntityKind::Icon => "Icon",
            EntityKind::Undefined => "Undefined",
        }
    }

    /// Whether entities of this kind may be emitted
    pub fn is_defined(&self) -> bool {
        *self != EntityKind::Undefined
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A classified polygon parsed from one SVG `path` element
///
/// The geometry is always a closed ring of at least four coordinates whose
/// first and last coordinates are equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Id of the element the entity was derived from
    pub original_id: String,
    /// Entity kind (never `Undefined`)
    pub kind: EntityKind,
    /// Polygon in pixel coordinates
    pub geometry: Polygon<f64>,
    /// All attributes of the source element, in document order
    pub attributes: Vec<(String, String)>,
}

impl Entity {
    /// Create a new entity
    pub fn new(original_id: impl Into<String>, kind: EntityKind, geometry: Polygon<f64>) -> Self {
        Self {
            original_id: original_id.into(),
            kind,
            geometry,
            attributes: Vec::new(),
        }
    }

    /// Set attributes
    pub fn with_attributes(mut self, attributes: Vec<(String, String)>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Look up a raw attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Ring coordinates, including the closing repeat
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.geometry.exterior().0
    }

    /// Unsigned area in square pixels
    pub fn area(&self) -> f64 {
        self.geometry.unsigned_area()
    }
}

/// One floor of a building, parsed from a single SVG document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Floor number, inferred from the enclosing folder name (default 0)
    pub floor_index: i32,
    /// Path of the source SVG document
    pub source_path: PathBuf,
    /// Canvas width in pixels
    pub width_pixels: f64,
    /// Canvas height in pixels
    pub height_pixels: f64,
    /// Pixel-to-meter scale, when a scale file accompanies the document
    pub pixels_per_meter: Option<f64>,
    /// Parsed entities in document order
    pub entities: Vec<Entity>,
}

impl Floor {
    /// Create an empty floor for the given document
    pub fn new(source_path: impl Into<PathBuf>, width_pixels: f64, height_pixels: f64) -> Self {
        Self {
            floor_index: 0,
            source_path: source_path.into(),
            width_pixels,
            height_pixels,
            pixels_per_meter: None,
            entities: Vec::new(),
        }
    }

    /// Iterate entities of one kind
    pub fn entities_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    /// Get entity count
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Directory containing the source document
    pub fn source_dir(&self) -> Option<&Path> {
        self.source_path.parent()
    }

    /// Inverse of the scale annotation, when present and non-zero
    pub fn meters_per_pixel(&self) -> Option<f64> {
        self.pixels_per_meter
            .filter(|ppm| *ppm != 0.0)
            .map(|ppm| 1.0 / ppm)
    }
}

/// A building and its floors
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Leaf name of the building directory
    pub building_id: String,
    /// Floors ordered ascending by floor index
    pub floors: Vec<Floor>,
}

impl Building {
    /// Create a building, ordering floors by index
    ///
    /// The sort is stable: floors sharing an index keep their discovery
    /// order and are not merged.
    pub fn new(building_id: impl Into<String>, mut floors: Vec<Floor>) -> Self {
        floors.sort_by_key(|f| f.floor_index);
        Self {
            building_id: building_id.into(),
            floors,
        }
    }

    /// Find the first floor with the given index
    pub fn floor(&self, floor_index: i32) -> Option<&Floor> {
        self.floors.iter().find(|f| f.floor_index == floor_index)
    }

    /// Get floor count
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Total entity count across all floors
    pub fn entity_count(&self) -> usize {
        self.floors.iter().map(Floor::entity_count).sum()
    }
}
