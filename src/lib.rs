pub mod config;
pub mod error;
pub mod geojson;
pub mod image_matcher;
pub mod importer;
pub mod io;
pub mod offset;
pub mod placement;
pub mod sink;
pub mod types;
#[cfg(feature = "visualization")]
pub mod visualization;

pub use config::{ImportConfig, PositionSource};
pub use error::{FeatureError, ImportError};
pub use importer::{ImportSummary, import_bytes, import_file};
pub use sink::{SceneSink, ScenePlan};
pub use types::{CameraFeature, OffsetLabel, PlacementRecord, Rvec};
