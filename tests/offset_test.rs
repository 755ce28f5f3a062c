use approx::assert_relative_eq;
use geojson_camera_importer::config::ImportConfig;
use geojson_camera_importer::offset::{
    apply_offset, mean_midpoint, needs_label, remove_offset, resolve_offset,
};
use glam::DVec3;
use proptest::prelude::*;

fn position() -> impl Strategy<Value = DVec3> {
    (-1.0e6..1.0e6f64, -1.0e7..1.0e7f64, -1.0e3..1.0e4f64).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

proptest! {
    #[test]
    fn mean_times_count_is_sum(positions in prop::collection::vec(position(), 1..200)) {
        let mean = mean_midpoint(&positions).unwrap();
        let n = positions.len() as f64;
        let sum: DVec3 = positions.iter().copied().sum();
        for axis in 0..3 {
            let tolerance = 1e-9 * (1.0 + sum[axis].abs());
            prop_assert!((mean[axis] * n - sum[axis]).abs() <= tolerance);
        }
    }

    #[test]
    fn offset_round_trip(p in position(), offset in position()) {
        let back = remove_offset(apply_offset(p, offset), offset);
        prop_assert!((back - p).abs().max_element() <= 1e-6);
    }

    #[test]
    fn manual_offset_ignores_cameras(
        positions in prop::collection::vec(position(), 0..20),
        manual in position(),
    ) {
        let config = ImportConfig { manual_offset: manual, ..Default::default() };
        prop_assert_eq!(resolve_offset(&config, &positions), manual);
    }
}

#[test]
fn test_mean_midpoint_of_three() {
    let positions = [
        DVec3::new(100.0, 200.0, 10.0),
        DVec3::new(102.0, 202.0, 12.0),
        DVec3::new(104.0, 204.0, 14.0),
    ];
    let mean = mean_midpoint(&positions).unwrap();
    assert_relative_eq!(mean.x, 102.0);
    assert_relative_eq!(mean.y, 202.0);
    assert_relative_eq!(mean.z, 12.0);
}

#[test]
fn test_empty_midpoint_is_zero() {
    assert!(mean_midpoint(&[]).is_none());
    let config = ImportConfig {
        use_mean_midpoint: true,
        manual_offset: DVec3::new(5.0, 5.0, 5.0),
        ..Default::default()
    };
    let offset = resolve_offset(&config, &[]);
    assert_eq!(offset, DVec3::ZERO);
    assert!(!needs_label(offset));
}

#[test]
fn test_mean_midpoint_replaces_manual_offset() {
    let config = ImportConfig {
        use_mean_midpoint: true,
        manual_offset: DVec3::new(1.0, 1.0, 1.0),
        ..Default::default()
    };
    let positions = [DVec3::new(2.0, 4.0, 6.0), DVec3::new(4.0, 8.0, 10.0)];
    assert_eq!(resolve_offset(&config, &positions), DVec3::new(3.0, 6.0, 8.0));
}

#[test]
fn test_needs_label() {
    assert!(!needs_label(DVec3::ZERO));
    assert!(needs_label(DVec3::new(0.0, 0.0, 0.5)));
    assert!(!needs_label(DVec3::new(-0.0, 0.0, 0.0)));
}
