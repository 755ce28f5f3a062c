use std::fmt;
use std::path::Path;

use glam::DVec3;
use indicatif::ProgressIterator;
use serde::Serialize;

use crate::config::ImportConfig;
use crate::error::{FeatureError, Result};
use crate::geojson::parse_feature_collection;
use crate::image_matcher::ImageIndex;
use crate::offset::{needs_label, resolve_offset};
use crate::placement::assemble;
use crate::sink::SceneSink;
use crate::types::{CameraFeature, OffsetLabel};

/// What one import run did, reported once at the end.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub matched_images: usize,
    pub offset: DVec3,
    pub label_emitted: bool,
    pub skip_reasons: Vec<String>,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "imported {} cameras, skipped {} features, matched {} images",
            self.imported, self.skipped, self.matched_images
        )?;
        if self.label_emitted {
            write!(
                f,
                ", offset X:{:.2} Y:{:.2} Z:{:.2}",
                self.offset.x, self.offset.y, self.offset.z
            )?;
        }
        Ok(())
    }
}

/// Imports a GeoJSON file; images are searched next to it.
pub fn import_file<S: SceneSink>(path: &Path, config: &ImportConfig, sink: S) -> Result<ImportSummary> {
    config.validate()?;
    let file_path = std::path::absolute(path)?;
    let bytes = std::fs::read(&file_path)?;
    log::info!("importing cameras from {}", file_path.display());
    let base_dir = file_path.parent().map(Path::to_path_buf);
    import_bytes(&bytes, base_dir.as_deref(), config, sink)
}

/// Imports an in-memory document. `image_dir` of `None` disables image matching.
pub fn import_bytes<S: SceneSink>(
    bytes: &[u8],
    image_dir: Option<&Path>,
    config: &ImportConfig,
    mut sink: S,
) -> Result<ImportSummary> {
    config.validate()?;
    let features = parse_feature_collection(bytes, config.position_source)?;

    let mut summary = ImportSummary::default();
    let mut cameras: Vec<CameraFeature> = Vec::with_capacity(features.len());
    for feature in features {
        match feature {
            Ok(camera) => cameras.push(camera),
            Err(e) => skip(&mut summary, e),
        }
    }
    log::info!("{} valid cameras, {} skipped features", cameras.len(), summary.skipped);

    let positions: Vec<DVec3> = cameras.iter().map(|c| c.position).collect();
    let offset = resolve_offset(config, &positions);
    summary.offset = offset;
    sink.begin_import(offset)?;

    if needs_label(offset) {
        let label = OffsetLabel::new(offset);
        log::info!("creating offset label {:?}", label.text);
        sink.create_offset_label(&label)?;
        summary.label_emitted = true;
    } else {
        log::info!("no offset applied, skipping offset label");
    }

    let images = image_dir
        .filter(|_| config.match_images)
        .map(ImageIndex::scan);
    let count = cameras.len() as u64;
    for camera in cameras.iter().progress_count(count) {
        let image = images.as_ref().and_then(|index| index.find(&camera.id));
        let image_resolution = image.as_deref().and_then(read_resolution);
        if image.is_some() {
            summary.matched_images += 1;
        }
        let record = assemble(camera, offset, config.sensor_width_mm, image, image_resolution);
        sink.create_camera(&record)?;
        summary.imported += 1;
    }
    sink.finish_import()?;

    log::info!("{summary}");
    Ok(summary)
}

fn skip(summary: &mut ImportSummary, e: FeatureError) {
    log::warn!("skipping {e}");
    summary.skipped += 1;
    summary.skip_reasons.push(e.to_string());
}

fn read_resolution(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(dims) => Some(dims),
        Err(e) => {
            log::warn!("cannot read size of {}: {e}", path.display());
            None
        }
    }
}
