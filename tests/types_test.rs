use approx::assert_relative_eq;
use geojson_camera_importer::{OffsetLabel, Rvec};
use glam::DVec3;

#[test]
fn test_offset_label_text() {
    let label = OffsetLabel::new(DVec3::new(597_123.4375, 6_643_210.004, -12.5));
    assert_eq!(label.text, "X:597123.44\nY:6643210.00\nZ:-12.50");
    assert_eq!(label.name, "Offset Values");
    assert_eq!(label.location, DVec3::ZERO);
}

#[test]
fn test_rvec_world_rotation_is_inverse() {
    let rvec = Rvec::new(0.1, 0.2, 0.3);
    let world = rvec.to_world_rotation();
    let camera = Rvec::new(-0.1, -0.2, -0.3).to_world_rotation();
    let product = world * camera;
    for (a, b) in product
        .to_cols_array()
        .iter()
        .zip(glam::DMat4::IDENTITY.to_cols_array().iter())
    {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
    assert_relative_eq!(rvec.angle(), (0.14f64).sqrt(), epsilon = 1e-12);
}
