//! The host side of an import: whatever turns placement records into scene objects.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{OffsetLabel, PlacementRecord};

pub trait SceneSink {
    /// Called once before any object is created, with the offset that every
    /// record's position already has subtracted.
    fn begin_import(&mut self, _offset: DVec3) -> Result<()> {
        Ok(())
    }

    /// Creates one camera object, with its background image when `record.image` is set.
    fn create_camera(&mut self, record: &PlacementRecord) -> Result<()>;

    /// Creates the text object describing the applied offset.
    fn create_offset_label(&mut self, label: &OffsetLabel) -> Result<()>;

    /// Called once after the last camera.
    fn finish_import(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects everything an import emitted, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    pub offset: DVec3,
    pub cameras: Vec<PlacementRecord>,
    pub label: Option<OffsetLabel>,
}

impl SceneSink for ScenePlan {
    fn begin_import(&mut self, offset: DVec3) -> Result<()> {
        self.offset = offset;
        Ok(())
    }

    fn create_camera(&mut self, record: &PlacementRecord) -> Result<()> {
        self.cameras.push(record.clone());
        Ok(())
    }

    fn create_offset_label(&mut self, label: &OffsetLabel) -> Result<()> {
        self.label = Some(label.clone());
        Ok(())
    }
}

impl<S: SceneSink + ?Sized> SceneSink for &mut S {
    fn begin_import(&mut self, offset: DVec3) -> Result<()> {
        (**self).begin_import(offset)
    }

    fn create_camera(&mut self, record: &PlacementRecord) -> Result<()> {
        (**self).create_camera(record)
    }

    fn create_offset_label(&mut self, label: &OffsetLabel) -> Result<()> {
        (**self).create_offset_label(label)
    }

    fn finish_import(&mut self) -> Result<()> {
        (**self).finish_import()
    }
}

/// Forwards every instruction to two sinks.
pub struct Tee<A, B>(pub A, pub B);

impl<A: SceneSink, B: SceneSink> SceneSink for Tee<A, B> {
    fn begin_import(&mut self, offset: DVec3) -> Result<()> {
        self.0.begin_import(offset)?;
        self.1.begin_import(offset)
    }

    fn create_camera(&mut self, record: &PlacementRecord) -> Result<()> {
        self.0.create_camera(record)?;
        self.1.create_camera(record)
    }

    fn create_offset_label(&mut self, label: &OffsetLabel) -> Result<()> {
        self.0.create_offset_label(label)?;
        self.1.create_offset_label(label)
    }

    fn finish_import(&mut self) -> Result<()> {
        self.0.finish_import()?;
        self.1.finish_import()
    }
}
