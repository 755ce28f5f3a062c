use std::path::PathBuf;

use approx::assert_relative_eq;
use geojson_camera_importer::placement::{
    DEFAULT_FOCAL_LENGTH_MM, assemble, focal_length_mm, fov_deg, world_transform,
};
use geojson_camera_importer::{CameraFeature, Rvec};
use glam::{DMat4, DVec3, DVec4};

fn feature(rotation: Option<Rvec>) -> CameraFeature {
    CameraFeature {
        id: "DJI_0042.JPG".to_string(),
        position: DVec3::new(500_010.0, 6_600_020.0, 130.0),
        rotation,
        focal: Some(0.85),
        resolution: Some((4000, 3000)),
        properties: serde_json::Map::new(),
    }
}

#[test]
fn test_focal_and_fov() {
    assert_relative_eq!(focal_length_mm(Some(0.5), 36.0), 18.0);
    assert_relative_eq!(focal_length_mm(None, 36.0), DEFAULT_FOCAL_LENGTH_MM);
    // 36 mm sensor behind an 18 mm lens sees 90 degrees
    assert_relative_eq!(fov_deg(18.0, 36.0), 90.0, epsilon = 1e-9);
}

#[test]
fn test_identity_rotation_applies_camera_flip() {
    let m = world_transform(DVec3::new(1.0, 2.0, 3.0), None);
    assert_eq!(m.w_axis, DVec4::new(1.0, 2.0, 3.0, 1.0));
    // local -Z (view direction) ends up along world +Z
    let forward = m.transform_vector3(DVec3::NEG_Z);
    assert_relative_eq!(forward.z, 1.0, epsilon = 1e-12);
    let up = m.transform_vector3(DVec3::Y);
    assert_relative_eq!(up.y, -1.0, epsilon = 1e-12);

    let zero = world_transform(DVec3::ZERO, Some(&Rvec::new(0.0, 0.0, 0.0)));
    assert_eq!(zero, world_transform(DVec3::ZERO, None));
}

#[test]
fn test_rotation_is_inverted_axis_angle() {
    let rvec = Rvec::new(0.0, 0.0, std::f64::consts::FRAC_PI_2);
    let m = world_transform(DVec3::ZERO, Some(&rvec));
    let flip = DMat4::from_rotation_x(std::f64::consts::PI);
    let rotation_only = m * flip.inverse();
    // -90 degrees about Z maps +X onto -Y
    let x = rotation_only.transform_vector3(DVec3::X);
    assert_relative_eq!(x.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(x.y, -1.0, epsilon = 1e-12);
}

#[test]
fn test_assemble_applies_offset_and_prefers_image_resolution() {
    let offset = DVec3::new(500_000.0, 6_600_000.0, 100.0);
    let image = PathBuf::from("photos/DJI_0042.JPG");
    let record = assemble(
        &feature(Some(Rvec::new(0.1, -0.2, 0.3))),
        offset,
        36.0,
        Some(image.clone()),
        Some((8000, 6000)),
    );
    assert_eq!(record.id, "DJI_0042.JPG");
    assert_eq!(record.position, DVec3::new(10.0, 20.0, 30.0));
    assert_eq!(record.world_transform.w_axis.truncate(), record.position);
    assert_relative_eq!(record.focal_length_mm, 30.6, epsilon = 1e-12);
    assert_eq!(record.resolution, Some((8000, 6000)));
    assert_eq!(record.image, Some(image));

    let record = assemble(&feature(None), DVec3::ZERO, 36.0, None, None);
    assert_eq!(record.resolution, Some((4000, 3000)));
    assert!(record.rotation.is_none());
}
