//! JSON calibration records, one per camera.

use crate::calibration::Calibration;
use dartboard_core::{
    BoardGeometry, GeometryError, Homography, Point2, RegionThresholds, SegmentOrder,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum CalibrationIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("no calibration stored for camera '{0}'")]
    UnknownCamera(String),
    #[error("stored calibration for camera '{camera}' is invalid: {source}")]
    InvalidRecord {
        camera: String,
        #[source]
        source: GeometryError,
    },
    #[error("stored perspective for camera '{camera}' is not an invertible homography")]
    InvalidPerspective { camera: String },
}

/// Smallest usable `|h22|` of a stored perspective matrix.
const MIN_H22: f64 = 1e-12;

/// Persisted form of a [`Calibration`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub center: [f64; 2],
    pub radius: f64,
    #[serde(default)]
    pub rotation_offset: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_order: Option<SegmentOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<RegionThresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspective: Option<[[f64; 3]; 3]>,
}

impl CalibrationRecord {
    /// Rebuild a validated calibration from the record stored for `camera`.
    fn to_calibration(&self, camera: &str) -> Result<Calibration, StoreError> {
        let geometry = BoardGeometry::new(
            Point2::new(self.center[0], self.center[1]),
            self.radius,
            self.rotation_offset,
            self.segment_order.unwrap_or_default(),
            self.regions.unwrap_or_default(),
        )
        .map_err(|source| StoreError::InvalidRecord {
            camera: camera.to_string(),
            source,
        })?;
        let perspective = match self.perspective {
            Some(rows) => Some(checked_perspective(rows).ok_or_else(|| {
                StoreError::InvalidPerspective {
                    camera: camera.to_string(),
                }
            })?),
            None => None,
        };
        Ok(Calibration {
            geometry,
            perspective,
        })
    }
}

/// Finite, invertible, with a usable `h22`.
fn checked_perspective(rows: [[f64; 3]; 3]) -> Option<Homography> {
    if !rows.iter().flatten().all(|v| v.is_finite()) || rows[2][2].abs() <= MIN_H22 {
        return None;
    }
    let h = Homography::from_array(rows);
    h.inverse().map(|_| h)
}

impl From<&Calibration> for CalibrationRecord {
    fn from(c: &Calibration) -> Self {
        let g = &c.geometry;
        let order = *g.segment_order();
        let regions = *g.regions();
        Self {
            center: [g.center().x, g.center().y],
            radius: g.radius(),
            rotation_offset: g.rotation_offset(),
            segment_order: (order != SegmentOrder::STANDARD).then_some(order),
            regions: (regions != RegionThresholds::default()).then_some(regions),
            perspective: c.perspective.map(|h| h.to_array()),
        }
    }
}

/// Calibration records keyed by camera id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalibrationStore {
    cameras: BTreeMap<String, CalibrationRecord>,
}

impl CalibrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CalibrationIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load a store, or start empty when the file does not exist yet.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, CalibrationIoError> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the store to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CalibrationIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Replace the record for `camera`, returning the previous one.
    pub fn insert(
        &mut self,
        camera: impl Into<String>,
        calibration: &Calibration,
    ) -> Option<CalibrationRecord> {
        self.cameras.insert(camera.into(), calibration.into())
    }

    pub fn get(&self, camera: &str) -> Option<&CalibrationRecord> {
        self.cameras.get(camera)
    }

    pub fn remove(&mut self, camera: &str) -> Option<CalibrationRecord> {
        self.cameras.remove(camera)
    }

    pub fn cameras(&self) -> impl Iterator<Item = &str> {
        self.cameras.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    /// Validated calibration for `camera`.
    pub fn calibration(&self, camera: &str) -> Result<Calibration, StoreError> {
        self.get(camera)
            .ok_or_else(|| StoreError::UnknownCamera(camera.to_string()))?
            .to_calibration(camera)
    }
}
