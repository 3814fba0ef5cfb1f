// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor parsing - one SVG document to one [`Floor`]

use crate::classifier::EntityClassifier;
use crate::polygon::parse_path_data;
use crate::tokenizer::parse_number;
use cubicasa_model::{Entity, EntityKind, Floor, LoaderError, Result};
use log::{debug, trace, warn};
use roxmltree::{Attribute, Document, Node, ParsingOptions};
use std::path::Path;

/// Fixed, case-sensitive name of a floor-plan document
pub const FLOOR_PLAN_FILE_NAME: &str = "model.svg";

/// Fixed, case-sensitive name of the pixels-per-meter annotation
pub const SCALE_FILE_NAME: &str = "pixel_to_meter.txt";

/// Parse the floor-plan document at `path`
///
/// The floor keeps index 0; the scale annotation is read from the sibling
/// [`SCALE_FILE_NAME`] when present.
///
/// # Errors
/// `LoaderError::Io` if the file cannot be read, `LoaderError::Xml` if it is
/// not well-formed.
pub fn parse_floor(path: &Path) -> Result<Floor> {
    let content = std::fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))?;

    let mut floor = parse_floor_str(&content, path)?;
    floor.pixels_per_meter = path.parent().and_then(read_scale_annotation);

    debug!(
        "parsed {} ({} entities, {}x{} px)",
        path.display(),
        floor.entity_count(),
        floor.width_pixels,
        floor.height_pixels
    );
    Ok(floor)
}

/// Parse an in-memory SVG document
///
/// `source_path` is recorded on the floor and used in error messages; the
/// file system is never touched, so no scale annotation is attached.
pub fn parse_floor_str(content: &str, source_path: &Path) -> Result<Floor> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(content, options).map_err(|e| {
        warn!("malformed SVG {}: {e}", source_path.display());
        LoaderError::xml(source_path, e.to_string())
    })?;

    let root = doc.root_element();
    let (width, height) = canvas_size(root);

    let mut floor = Floor::new(source_path, width, height);
    floor.entities = root
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "path")
        .filter_map(extract_entity)
        .collect();

    Ok(floor)
}

/// Read the pixels-per-meter annotation next to a floor-plan document
///
/// Missing, unreadable or non-numeric files all yield `None`.
pub fn read_scale_annotation(dir: &Path) -> Option<f64> {
    let path = dir.join(SCALE_FILE_NAME);
    let content = std::fs::read_to_string(&path).ok()?;
    let value = parse_number(content.trim());
    if value.is_none() {
        trace!("ignoring unparsable scale file {}", path.display());
    }
    value
}

/// Canvas size from `viewBox`, falling back to `width`/`height`
fn canvas_size(svg: Node) -> (f64, f64) {
    if let Some(view_box) = svg.attribute("viewBox").and_then(parse_view_box) {
        return (view_box[2], view_box[3]);
    }

    let dimension = |name: &str| {
        svg.attribute(name)
            .and_then(|value| parse_number(value.trim()))
            .unwrap_or(0.0)
    };
    (dimension("width"), dimension("height"))
}

/// Parse exactly four space/comma separated numbers
fn parse_view_box(value: &str) -> Option<[f64; 4]> {
    let mut numbers = value
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|part| !part.is_empty())
        .map(parse_number);

    let mut view_box = [0.0; 4];
    for slot in &mut view_box {
        *slot = numbers.next()??;
    }
    numbers.next().is_none().then_some(view_box)
}

/// Build an entity from one `path` element, or skip it
fn extract_entity(path: Node) -> Option<Entity> {
    let data = path.attribute("d").filter(|d| !d.is_empty())?;

    let own_id = path.attribute("id").unwrap_or_default();
    let parent_id = path
        .parent_element()
        .and_then(|parent| parent.attribute("id"))
        .unwrap_or_default();

    let kind = match EntityClassifier::classify(parent_id) {
        EntityKind::Undefined => EntityClassifier::classify(own_id),
        kind => kind,
    };
    if kind == EntityKind::Undefined {
        trace!("skipping unclassified path (parent {parent_id:?}, id {own_id:?})");
        return None;
    }

    let Some(geometry) = parse_path_data(data) else {
        trace!("skipping {kind} path without a valid ring");
        return None;
    };

    let original_id = if parent_id.is_empty() { own_id } else { parent_id };
    let attributes = path
        .attributes()
        .map(|attr| (qualified_name(path, &attr), attr.value().to_string()))
        .collect();

    Some(Entity::new(original_id, kind, geometry).with_attributes(attributes))
}

/// Attribute name as written in the document, prefix included
fn qualified_name(node: Node, attr: &Attribute) -> String {
    let prefix = attr.namespace().and_then(|uri| {
        if uri == XML_NAMESPACE {
            Some("xml")
        } else {
            node.lookup_prefix(uri)
        }
    });

    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", attr.name()),
        _ => attr.name().to_string(),
    }
}

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
