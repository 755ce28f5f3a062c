use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

pub const DEFAULT_SENSOR_WIDTH_MM: f64 = 36.0;

/// Where a camera's position is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PositionSource {
    /// `properties.translation` if any feature of the collection has one,
    /// else the Point coordinates.
    #[default]
    Auto,
    /// Always the Point geometry coordinates.
    Geometry,
    /// Always `properties.translation`.
    Translation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportConfig {
    pub sensor_width_mm: f64,
    /// Ignored when `use_mean_midpoint` is set.
    pub manual_offset: DVec3,
    pub use_mean_midpoint: bool,
    pub position_source: PositionSource,
    /// Look for background images next to the GeoJSON file.
    pub match_images: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            sensor_width_mm: DEFAULT_SENSOR_WIDTH_MM,
            manual_offset: DVec3::ZERO,
            use_mean_midpoint: false,
            position_source: PositionSource::Auto,
            match_images: true,
        }
    }
}

impl ImportConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.sensor_width_mm.is_finite() || self.sensor_width_mm <= 0.0 {
            return Err(ImportError::InvalidConfig(format!(
                "sensor width must be > 0 mm, got {}",
                self.sensor_width_mm
            )));
        }
        if !self.manual_offset.is_finite() {
            return Err(ImportError::InvalidConfig(format!(
                "manual offset must be finite, got {}",
                self.manual_offset
            )));
        }
        Ok(())
    }
}

/// Command-line flags layered over an [`ImportConfig`] loaded from file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOverrides {
    /// camera sensor width in mm
    #[arg(long)]
    pub sensor_width: Option<f64>,

    #[arg(long)]
    pub offset_x: Option<f64>,

    #[arg(long)]
    pub offset_y: Option<f64>,

    #[arg(long)]
    pub offset_z: Option<f64>,

    /// use the mean midpoint of all cameras as offset
    #[arg(long, overrides_with = "no_mean_midpoint")]
    pub mean_midpoint: bool,

    /// use the manual offset even if the config file asks for the midpoint
    #[arg(long, overrides_with = "mean_midpoint")]
    pub no_mean_midpoint: bool,

    #[arg(long, value_enum)]
    pub position_source: Option<PositionSource>,

    /// do not look for matching images
    #[arg(long)]
    pub no_images: bool,
}

impl ConfigOverrides {
    /// `None` when neither midpoint flag was given.
    pub fn use_mean_midpoint(&self) -> Option<bool> {
        match (self.mean_midpoint, self.no_mean_midpoint) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn apply(&self, config: &mut ImportConfig) {
        if let Some(w) = self.sensor_width {
            config.sensor_width_mm = w;
        }
        if let Some(x) = self.offset_x {
            config.manual_offset.x = x;
        }
        if let Some(y) = self.offset_y {
            config.manual_offset.y = y;
        }
        if let Some(z) = self.offset_z {
            config.manual_offset.z = z;
        }
        if let Some(midpoint) = self.use_mean_midpoint() {
            config.use_mean_midpoint = midpoint;
        }
        if let Some(source) = self.position_source {
            config.position_source = source;
        }
        if self.no_images {
            config.match_images = false;
        }
    }
}
