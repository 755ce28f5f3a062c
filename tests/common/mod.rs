#![allow(dead_code)]

use serde_json::{Value, json};

pub fn point_feature(filename: &str, coordinates: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": coordinates },
        "properties": { "filename": filename }
    })
}

pub fn collection(features: Vec<Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({ "type": "FeatureCollection", "features": features })).unwrap()
}

/// The three cameras used by the end-to-end scenarios.
pub fn three_cameras() -> Vec<Value> {
    vec![
        point_feature("cam1.JPG", json!([100.0, 200.0, 10.0])),
        point_feature("cam2.JPG", json!([102.0, 202.0, 12.0])),
        point_feature("cam3.JPG", json!([104.0, 204.0, 14.0])),
    ]
}

/// A feature shaped like an OpenDroneMap shots.geojson entry.
pub fn odm_shot(filename: &str, translation: [f64; 3], rotation: [f64; 3]) -> Value {
    json!({
        "type": "Feature",
        "properties": {
            "filename": filename,
            "camera": "v2 dji fc6310 5472 3648 brown 0.6666",
            "focal": 0.6666,
            "width": 5472,
            "height": 3648,
            "capture_time": 1_600_000_000.0,
            "translation": translation,
            "rotation": rotation
        },
        "geometry": { "type": "Point", "coordinates": [10.75, 59.91, 120.0] }
    })
}
