// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ring building from tokenized path commands

use crate::tokenizer::{PathCommand, PathTokenizer};
use cubicasa_model::Coordinate;
use geo::{coord, LineString, Polygon};
use log::trace;

/// Minimum coordinates for a closed ring: a triangle plus the closing repeat
pub const MIN_RING_COORDINATES: usize = 4;

/// Accumulates one path's commands into a single ring
///
/// There is no sub-path splitting: a `MoveTo` after the first point appends
/// a coordinate exactly like a `LineTo`.
#[derive(Clone, Debug, Default)]
pub struct PolygonBuilder {
    coords: Vec<Coordinate>,
}

impl PolygonBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one command
    pub fn push(&mut self, command: PathCommand) {
        match command {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                self.coords.push(coord! { x: x, y: y });
            }
            PathCommand::Close => {
                // Close before any point is a no-op
                if let Some(first) = self.coords.first().copied() {
                    self.coords.push(first);
                }
            }
        }
    }

    /// Coordinates accumulated so far
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coords
    }

    /// Finish the ring
    ///
    /// Returns `None` when the ring has fewer than four coordinates, is not
    /// closed, or contains a non-finite coordinate.
    pub fn finish(self) -> Option<Polygon<f64>> {
        if self.coords.len() < MIN_RING_COORDINATES {
            trace!("dropping ring with {} coordinates", self.coords.len());
            return None;
        }
        ring_to_polygon(self.coords)
    }
}

impl Extend<PathCommand> for PolygonBuilder {
    fn extend<T: IntoIterator<Item = PathCommand>>(&mut self, iter: T) {
        for command in iter {
            self.push(command);
        }
    }
}

impl FromIterator<PathCommand> for PolygonBuilder {
    fn from_iter<T: IntoIterator<Item = PathCommand>>(iter: T) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}

/// Build a polygon from a ring, rejecting invalid rings
fn ring_to_polygon(coords: Vec<Coordinate>) -> Option<Polygon<f64>> {
    if coords.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return None;
    }

    let first = coords.first()?;
    let last = coords.last()?;
    if first != last {
        trace!("dropping open ring ending at ({}, {})", last.x, last.y);
        return None;
    }

    Some(Polygon::new(LineString::new(coords), vec![]))
}

/// Parse path data straight into a polygon
///
/// # Example
///
/// ```
/// use cubicasa_parser::parse_path_data;
///
/// let square = parse_path_data("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap();
/// assert_eq!(square.exterior().0.len(), 5);
/// assert!(parse_path_data("M 0 0 L 10 10 Z").is_none());
/// ```
pub fn parse_path_data(data: &str) -> Option<Polygon<f64>> {
    PathTokenizer::new(data).collect::<PolygonBuilder>().finish()
}
