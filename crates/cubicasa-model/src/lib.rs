// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CubiCasa Model - Trait definitions and shared types for floor-plan parsing
//!
//! This crate provides the core abstractions for working with the CubiCasa5k
//! floor-plan dataset: one building per directory, one SVG document per floor.
//! It defines the records produced by a parser backend and the traits a
//! backend implements, so consumers can load floor plans without depending on
//! a particular parser.
//!
//! # Architecture
//!
//! - [`Entity`] - A classified polygon (wall, room, door, ...) in pixel space
//! - [`Floor`] - All entities parsed from one SVG document
//! - [`Building`] - The floors of one building, ordered by floor index
//! - [`FloorPlanLoader`] - Entry point implemented by parser backends
//!
//! # Example
//!
//! ```ignore
//! use cubicasa_model::{EntityKind, FloorPlanLoader};
//!
//! let loader: Box<dyn FloorPlanLoader> = get_loader();
//! let building = loader.load_building("data/high_quality/1001".as_ref())?;
//! for floor in &building.floors {
//!     let walls = floor.entities_of_kind(EntityKind::Wall).count();
//!     println!("F{}: {} walls", floor.floor_index, walls);
//! }
//! ```

pub mod error;
pub mod traits;
pub mod types;

// Re-export all public types
pub use error::*;
pub use traits::*;
pub use types::*;
