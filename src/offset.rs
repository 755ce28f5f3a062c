use glam::DVec3;

use crate::config::ImportConfig;

/// Per-axis arithmetic mean. `None` for an empty set.
pub fn mean_midpoint(positions: &[DVec3]) -> Option<DVec3> {
    if positions.is_empty() {
        return None;
    }
    let sum: DVec3 = positions.iter().copied().sum();
    Some(sum / positions.len() as f64)
}

/// The translation subtracted from every camera in this run.
pub fn resolve_offset(config: &ImportConfig, positions: &[DVec3]) -> DVec3 {
    if !config.use_mean_midpoint {
        log::info!("using manual offset {}", config.manual_offset);
        return config.manual_offset;
    }
    match mean_midpoint(positions) {
        Some(midpoint) => {
            log::info!("mean midpoint of {} cameras: {}", positions.len(), midpoint);
            midpoint
        }
        None => {
            log::warn!("no valid cameras to average, offset is zero");
            DVec3::ZERO
        }
    }
}

pub fn apply_offset(position: DVec3, offset: DVec3) -> DVec3 {
    position - offset
}

pub fn remove_offset(adjusted: DVec3, offset: DVec3) -> DVec3 {
    adjusted + offset
}

/// A label is only worth creating when the scene was actually moved.
pub fn needs_label(offset: DVec3) -> bool {
    offset != DVec3::ZERO
}
