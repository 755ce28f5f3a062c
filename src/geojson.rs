//! Minimal GeoJSON FeatureCollection reader for OpenDroneMap shot files.
//!
//! Only the structure the importer needs is checked: a top-level
//! `FeatureCollection` with a `features` array of `Point` features whose
//! coordinates have exactly three finite numbers.
//!
//! [`PositionSource::Auto`] is settled once per collection: if any feature
//! carries a `translation` every camera is read from it, otherwise every camera
//! is read from its Point. A run never mixes the projected frame of
//! `translation` with the lon/lat of the geometry.

use glam::DVec3;
use serde_json::{Map, Value as JsonValue};

use crate::config::PositionSource;
use crate::error::{FeatureError, ImportError, Result};
use crate::types::{CameraFeature, Rvec};

const POINT_TYPES: [&str; 2] = ["Point", "PointZ"];

/// Single pass over the `features` array of a parsed document.
pub struct FeatureIter {
    features: std::iter::Enumerate<std::vec::IntoIter<JsonValue>>,
    position_source: PositionSource,
}

impl FeatureIter {
    /// Number of features not yet visited, valid or not.
    pub fn remaining(&self) -> usize {
        self.features.len()
    }

    /// Source used for every feature of this collection, never `Auto`.
    pub fn position_source(&self) -> PositionSource {
        self.position_source
    }
}

impl Iterator for FeatureIter {
    type Item = std::result::Result<CameraFeature, FeatureError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, feature) = self.features.next()?;
        Some(parse_feature(index, feature, self.position_source))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.features.size_hint()
    }
}

impl ExactSizeIterator for FeatureIter {}

/// Parses raw bytes into a lazy sequence of camera features.
///
/// Fails only when the document itself is unusable; malformed features are
/// yielded as `Err` items.
pub fn parse_feature_collection(bytes: &[u8], position_source: PositionSource) -> Result<FeatureIter> {
    let root: JsonValue = serde_json::from_slice(bytes)
        .map_err(|e| ImportError::Format(format!("invalid JSON: {e}")))?;
    let JsonValue::Object(mut root) = root else {
        return Err(ImportError::Format("top-level value is not an object".to_string()));
    };
    let kind = root.get("type").and_then(JsonValue::as_str).unwrap_or("");
    if kind != "FeatureCollection" {
        return Err(ImportError::Format(format!(
            "expected a FeatureCollection, found type '{kind}'"
        )));
    }
    let features = match root.remove("features") {
        Some(JsonValue::Array(features)) => features,
        Some(_) => return Err(ImportError::Format("'features' is not an array".to_string())),
        None => return Err(ImportError::Format("no 'features' key found".to_string())),
    };
    log::debug!("feature collection holds {} features", features.len());
    let position_source = match position_source {
        PositionSource::Auto if features.iter().any(has_translation) => PositionSource::Translation,
        PositionSource::Auto => PositionSource::Geometry,
        source => source,
    };
    log::info!("reading camera positions from {position_source:?}");
    Ok(FeatureIter {
        features: features.into_iter().enumerate(),
        position_source,
    })
}

fn has_translation(feature: &JsonValue) -> bool {
    feature
        .get("properties")
        .and_then(|p| p.get("translation"))
        .is_some_and(|t| !t.is_null())
}

fn parse_feature(
    index: usize,
    feature: JsonValue,
    position_source: PositionSource,
) -> std::result::Result<CameraFeature, FeatureError> {
    let JsonValue::Object(mut feature) = feature else {
        return Err(FeatureError::NotAnObject { index });
    };
    let geometry = feature
        .get("geometry")
        .and_then(JsonValue::as_object)
        .ok_or(FeatureError::MissingGeometry { index })?;
    let kind = geometry.get("type").and_then(JsonValue::as_str).unwrap_or("");
    if !POINT_TYPES.contains(&kind) {
        return Err(FeatureError::NotAPoint {
            index,
            kind: kind.to_string(),
        });
    }
    let coordinates = vec3_field(index, geometry.get("coordinates"), "coordinates")?
        .ok_or(FeatureError::MissingGeometry { index })?;

    let properties = match feature.remove("properties") {
        Some(JsonValue::Object(p)) => p,
        _ => Map::new(),
    };
    let translation = vec3_field(index, properties.get("translation"), "translation");
    let position = match position_source {
        PositionSource::Geometry => coordinates,
        // `Auto` is resolved in `parse_feature_collection`
        PositionSource::Translation | PositionSource::Auto => {
            translation?.ok_or(FeatureError::MissingField {
                index,
                field: "translation",
            })?
        }
    };
    let rotation = vec3_field(index, properties.get("rotation"), "rotation")?.map(Rvec);

    let focal = properties
        .get("focal")
        .and_then(JsonValue::as_f64)
        .filter(|f| f.is_finite() && *f > 0.0);
    let resolution = match (dimension(&properties, "width"), dimension(&properties, "height")) {
        (Some(w), Some(h)) => Some((w, h)),
        _ => None,
    };

    Ok(CameraFeature {
        id: camera_id(index, &feature, &properties),
        position,
        rotation,
        focal,
        resolution,
        properties,
    })
}

fn camera_id(index: usize, feature: &Map<String, JsonValue>, properties: &Map<String, JsonValue>) -> String {
    let as_id = |v: &JsonValue| match v {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    };
    properties
        .get("filename")
        .and_then(as_id)
        .or_else(|| properties.get("id").and_then(as_id))
        .or_else(|| feature.get("id").and_then(as_id))
        .unwrap_or_else(|| format!("camera_{index}"))
}

fn dimension(properties: &Map<String, JsonValue>, key: &str) -> Option<u32> {
    properties
        .get(key)
        .and_then(JsonValue::as_u64)
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}

/// Reads an optional `[x, y, z]` field. `Ok(None)` when absent or null.
fn vec3_field(
    index: usize,
    value: Option<&JsonValue>,
    field: &'static str,
) -> std::result::Result<Option<DVec3>, FeatureError> {
    let values = match value {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(JsonValue::Array(values)) => values,
        Some(_) => return Err(FeatureError::NotNumeric { index, field }),
    };
    if values.len() != 3 {
        return Err(FeatureError::BadArity {
            index,
            field,
            len: values.len(),
        });
    }
    let mut xyz = [0.0; 3];
    for (slot, v) in xyz.iter_mut().zip(values) {
        *slot = v.as_f64().ok_or(FeatureError::NotNumeric { index, field })?;
    }
    let v = DVec3::from_array(xyz);
    if !v.is_finite() {
        return Err(FeatureError::NonFinite { index, field });
    }
    Ok(Some(v))
}
