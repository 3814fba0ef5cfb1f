// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity classification from SVG element ids

use cubicasa_model::EntityKind;

/// Ordered classification rules: `(lowercase keyword, kind)`
///
/// Evaluated top to bottom; the first keyword contained in the id wins.
pub const CLASSIFICATION_RULES: &[(&str, EntityKind)] = &[
    ("wall", EntityKind::Wall),
    ("room", EntityKind::Room),
    ("window", EntityKind::Window),
    ("door", EntityKind::Door),
    ("stairs", EntityKind::Stairs),
    ("railing", EntityKind::Railing),
    ("icon", EntityKind::Icon),
];

/// Maps SVG element ids to entity kinds
pub struct EntityClassifier;

impl EntityClassifier {
    /// Classify an element id by case-insensitive substring match
    ///
    /// Empty or unmatched ids classify as [`EntityKind::Undefined`].
    pub fn classify(id: &str) -> EntityKind {
        if id.is_empty() {
            return EntityKind::Undefined;
        }

        let id = id.to_lowercase();
        CLASSIFICATION_RULES
            .iter()
            .find(|(keyword, _)| id.contains(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(EntityKind::Undefined)
    }
}
