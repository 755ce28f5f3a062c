use std::collections::HashSet;

use glam::DVec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rerun::RecordingStream;

use crate::error::{ImportError, Result};
use crate::sink::SceneSink;
use crate::types::{OffsetLabel, PlacementRecord};

pub fn id_to_color(id: &str) -> (u8, u8, u8, u8) {
    let seed = id
        .bytes()
        .fold(0u64, |h, b| h.wrapping_mul(31).wrapping_add(b as u64));
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let color_num = rng.random_range(0..2u32.pow(24));
    (
        ((color_num >> 16) % 256) as u8,
        ((color_num >> 8) % 256) as u8,
        (color_num % 256) as u8,
        255,
    )
}

/// Entity path segment for a camera id.
pub fn entity_name(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

fn sink_err(e: rerun::RecordingStreamError) -> ImportError {
    ImportError::Sink(e.to_string())
}

/// Scene sink that logs cameras, their photos and the offset label to Rerun.
pub struct RerunSink {
    recording: RecordingStream,
    centers: Vec<[f32; 3]>,
    colors: Vec<(u8, u8, u8, u8)>,
    labels: Vec<String>,
    entities: Vec<String>,
    taken: HashSet<String>,
}

impl RerunSink {
    pub fn new(recording: RecordingStream) -> RerunSink {
        RerunSink {
            recording,
            centers: Vec::new(),
            colors: Vec::new(),
            labels: Vec::new(),
            entities: Vec::new(),
            taken: HashSet::new(),
        }
    }

    pub fn recording(&self) -> &RecordingStream {
        &self.recording
    }

    /// Entity names given to the cameras so far, in import order.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// `entity_name(id)`, suffixed with `_2`, `_3`, ... when already in use.
    fn claim_entity_name(&mut self, id: &str) -> String {
        let base = entity_name(id);
        let mut name = base.clone();
        let mut n = 1;
        while self.taken.contains(&name) {
            n += 1;
            name = format!("{base}_{n}");
        }
        if n > 1 {
            log::warn!("camera {id} renamed to entity {name} to avoid a collision");
        }
        self.taken.insert(name.clone());
        self.entities.push(name.clone());
        name
    }
}

fn to_f32(v: DVec3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

impl SceneSink for RerunSink {
    fn begin_import(&mut self, _offset: DVec3) -> Result<()> {
        self.recording
            .log_static("world", &rerun::ViewCoordinates::RIGHT_HAND_Z_UP())
            .map_err(sink_err)
    }

    fn create_camera(&mut self, record: &PlacementRecord) -> Result<()> {
        let topic = format!("world/cameras/{}", self.claim_entity_name(&record.id));
        let (_, rotation, translation) = record.world_transform.to_scale_rotation_translation();
        self.recording
            .log(
                topic.as_str(),
                &rerun::Transform3D::from_translation_rotation(
                    to_f32(translation),
                    rerun::Quaternion::from_xyzw(
                        [rotation.x, rotation.y, rotation.z, rotation.w].map(|v| v as f32),
                    ),
                ),
            )
            .map_err(sink_err)?;

        if let Some((width, height)) = record.resolution {
            let focal_px = (record.focal_length_mm / record.sensor_width_mm * width as f64) as f32;
            self.recording
                .log(
                    format!("{}/image", topic),
                    &rerun::Pinhole::from_focal_length_and_resolution(
                        [focal_px, focal_px],
                        [width as f32, height as f32],
                    )
                    .with_camera_xyz(rerun::components::ViewCoordinates::RUB),
                )
                .map_err(sink_err)?;
        }

        if let Some(path) = &record.image {
            match rerun::EncodedImage::from_file(path) {
                Ok(image) => self
                    .recording
                    .log(format!("{}/image", topic), &image)
                    .map_err(sink_err)?,
                Err(e) => log::warn!("cannot log image {}: {e}", path.display()),
            }
        }

        self.centers.push(to_f32(record.position));
        self.colors.push(id_to_color(&record.id));
        self.labels.push(record.id.clone());
        Ok(())
    }

    fn create_offset_label(&mut self, label: &OffsetLabel) -> Result<()> {
        self.recording
            .log("world/offset_label", &rerun::TextDocument::new(label.text.clone()))
            .map_err(sink_err)
    }

    fn finish_import(&mut self) -> Result<()> {
        self.recording
            .log(
                "world/camera_centers",
                &rerun::Points3D::new(self.centers.clone())
                    .with_colors(self.colors.clone())
                    .with_labels(self.labels.clone())
                    .with_radii([rerun::Radius::new_ui_points(5.0)]),
            )
            .map_err(sink_err)
    }
}
