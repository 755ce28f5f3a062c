use std::path::PathBuf;

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// Axis-angle rotation vector as written by OpenDroneMap (radians, camera from world).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rvec(pub DVec3);

impl Rvec {
    pub fn new(x: f64, y: f64, z: f64) -> Rvec {
        Rvec(DVec3::new(x, y, z))
    }

    pub fn angle(&self) -> f64 {
        self.0.length()
    }

    /// World-from-camera rotation, i.e. the rotation of `-rvec`.
    pub fn to_world_rotation(&self) -> DMat4 {
        let angle = self.angle();
        if angle > 0.0 {
            DMat4::from_axis_angle((-self.0) / angle, angle)
        } else {
            DMat4::IDENTITY
        }
    }
}

/// One validated camera shot from the input collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFeature {
    pub id: String,
    pub position: DVec3,
    pub rotation: Option<Rvec>,
    /// Focal length normalized by the sensor width.
    pub focal: Option<f64>,
    pub resolution: Option<(u32, u32)>,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// Instruction to create one camera object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRecord {
    pub id: String,
    /// Input position minus the applied offset.
    pub position: DVec3,
    pub rotation: Option<Rvec>,
    pub sensor_width_mm: f64,
    pub focal_length_mm: f64,
    pub fov_deg: f64,
    pub resolution: Option<(u32, u32)>,
    pub world_transform: DMat4,
    pub image: Option<PathBuf>,
}

/// Text annotation describing the applied offset, anchored at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetLabel {
    pub name: String,
    pub text: String,
    pub location: DVec3,
}

impl OffsetLabel {
    pub const NAME: &'static str = "Offset Values";

    pub fn new(offset: DVec3) -> OffsetLabel {
        OffsetLabel {
            name: Self::NAME.to_string(),
            text: format!("X:{:.2}\nY:{:.2}\nZ:{:.2}", offset.x, offset.y, offset.z),
            location: DVec3::ZERO,
        }
    }
}
