use std::path::PathBuf;

use glam::{DMat4, DVec3};

use crate::offset::apply_offset;
use crate::types::{CameraFeature, PlacementRecord, Rvec};

/// Lens used when a shot carries no usable focal length.
pub const DEFAULT_FOCAL_LENGTH_MM: f64 = 50.0;

pub fn focal_length_mm(focal: Option<f64>, sensor_width_mm: f64) -> f64 {
    focal.map_or(DEFAULT_FOCAL_LENGTH_MM, |f| sensor_width_mm * f)
}

/// Horizontal field of view in degrees.
pub fn fov_deg(focal_length_mm: f64, sensor_width_mm: f64) -> f64 {
    2.0 * (sensor_width_mm / (2.0 * focal_length_mm)).atan().to_degrees()
}

/// `T(position) * R(-rvec) * Rx(180)`; the last factor flips the
/// OpenCV camera frame (+Z forward, Y down) to -Z forward, Y up.
pub fn world_transform(position: DVec3, rotation: Option<&Rvec>) -> DMat4 {
    let rotation = rotation.map_or(DMat4::IDENTITY, Rvec::to_world_rotation);
    DMat4::from_translation(position) * rotation * DMat4::from_rotation_x(std::f64::consts::PI)
}

pub fn assemble(
    feature: &CameraFeature,
    offset: DVec3,
    sensor_width_mm: f64,
    image: Option<PathBuf>,
    image_resolution: Option<(u32, u32)>,
) -> PlacementRecord {
    let position = apply_offset(feature.position, offset);
    let focal_length_mm = focal_length_mm(feature.focal, sensor_width_mm);
    PlacementRecord {
        id: feature.id.clone(),
        position,
        rotation: feature.rotation,
        sensor_width_mm,
        focal_length_mm,
        fov_deg: fov_deg(focal_length_mm, sensor_width_mm),
        resolution: image_resolution.or(feature.resolution),
        world_transform: world_transform(position, feature.rotation.as_ref()),
        image,
    }
}
