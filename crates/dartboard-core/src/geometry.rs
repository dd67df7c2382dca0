//! Calibrated board description: centre, radius, rotation, wedge order and
//! ring thresholds.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Angular width of one wedge, in degrees.
pub const WEDGE_DEG: f64 = 18.0;

/// Number of numbered wedges on a board.
pub const WEDGE_COUNT: usize = 20;

/// Reduce an angle in degrees to `[0, 360)`.
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Geometry validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("radius must be finite and > 0 (got {0})")]
    InvalidRadius(f64),
    #[error("center must be finite")]
    NonFiniteCenter,
    #[error("rotation offset must be finite")]
    NonFiniteRotation,
    #[error("region threshold {name} must lie in (0, 1] (got {value})")]
    RegionOutOfRange { name: &'static str, value: f64 },
    #[error("region thresholds must be strictly increasing ({lower} >= {upper})")]
    RegionsNotIncreasing { lower: &'static str, upper: &'static str },
    #[error("segment order must be a permutation of 1..=20")]
    InvalidSegmentOrder,
}

/// Point values of the 20 wedges, clockwise, starting at angle 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[i32; 20]", into = "[i32; 20]")]
pub struct SegmentOrder([i32; WEDGE_COUNT]);

impl SegmentOrder {
    /// The regulation board layout with 20 at angle 0.
    pub const STANDARD: SegmentOrder = SegmentOrder([
        20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
    ]);

    /// Validate and wrap a wedge ordering.
    pub fn new(values: [i32; WEDGE_COUNT]) -> Result<Self, GeometryError> {
        let mut seen = [false; WEDGE_COUNT];
        for v in values {
            if !(1..=WEDGE_COUNT as i32).contains(&v) {
                return Err(GeometryError::InvalidSegmentOrder);
            }
            let slot = &mut seen[(v - 1) as usize];
            if *slot {
                return Err(GeometryError::InvalidSegmentOrder);
            }
            *slot = true;
        }
        Ok(Self(values))
    }

    #[inline]
    pub fn values(&self) -> [i32; WEDGE_COUNT] {
        self.0
    }

    /// Point value of the wedge at `index` (taken modulo 20).
    #[inline]
    pub fn value_at(&self, index: usize) -> i32 {
        self.0[index % WEDGE_COUNT]
    }

    /// Wedge index holding `value`, if any.
    pub fn index_of(&self, value: i32) -> Option<usize> {
        self.0.iter().position(|&v| v == value)
    }

    /// Centre angle of the wedge at `index`, before rotation.
    #[inline]
    pub fn center_angle(index: usize) -> f64 {
        (index % WEDGE_COUNT) as f64 * WEDGE_DEG
    }

    /// Unrotated angle of the boundary shared by wedges `a` and `b`.
    ///
    /// The order of `a` and `b` does not matter. Returns `None` when the two
    /// values are not neighbours in this ordering.
    pub fn boundary_angle(&self, a: i32, b: i32) -> Option<f64> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        let lower = if (ia + 1) % WEDGE_COUNT == ib {
            ia
        } else if (ib + 1) % WEDGE_COUNT == ia {
            ib
        } else {
            return None;
        };
        Some(normalize_degrees(Self::center_angle(lower) + 0.5 * WEDGE_DEG))
    }
}

impl Default for SegmentOrder {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<[i32; WEDGE_COUNT]> for SegmentOrder {
    type Error = GeometryError;

    fn try_from(values: [i32; WEDGE_COUNT]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<SegmentOrder> for [i32; WEDGE_COUNT] {
    fn from(order: SegmentOrder) -> Self {
        order.0
    }
}

/// Ring boundaries as fractions of the board radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionThresholds {
    pub bull_inner: f64,
    pub bull_outer: f64,
    pub triple_inner: f64,
    pub triple_outer: f64,
    pub double_inner: f64,
    pub double_outer: f64,
}

impl Default for RegionThresholds {
    fn default() -> Self {
        Self {
            bull_inner: 0.08,
            bull_outer: 0.16,
            triple_inner: 0.55,
            triple_outer: 0.65,
            double_inner: 0.85,
            double_outer: 0.95,
        }
    }
}

impl RegionThresholds {
    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("bull_inner", self.bull_inner),
            ("bull_outer", self.bull_outer),
            ("triple_inner", self.triple_inner),
            ("triple_outer", self.triple_outer),
            ("double_inner", self.double_inner),
            ("double_outer", self.double_outer),
        ]
    }

    /// Check range and strict ordering of all six thresholds.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let named = self.named();
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(GeometryError::RegionOutOfRange { name, value });
            }
        }
        for pair in named.windows(2) {
            let (lower, lo) = pair[0];
            let (upper, hi) = pair[1];
            if lo >= hi {
                return Err(GeometryError::RegionsNotIncreasing { lower, upper });
            }
        }
        Ok(())
    }
}

/// Immutable description of a calibrated board.
///
/// Instances only exist in validated form: construct them with
/// [`BoardGeometry::new`] (or deserialize, which validates the same way).
/// Recalibration produces a new value instead of editing fields.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct BoardGeometry {
    center: Point2<f64>,
    radius: f64,
    rotation_offset: f64,
    segment_order: SegmentOrder,
    regions: RegionThresholds,
}

#[derive(Deserialize)]
struct RawGeometry {
    center: Point2<f64>,
    radius: f64,
    #[serde(default)]
    rotation_offset: f64,
    #[serde(default)]
    segment_order: SegmentOrder,
    #[serde(default)]
    regions: RegionThresholds,
}

impl TryFrom<RawGeometry> for BoardGeometry {
    type Error = GeometryError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        BoardGeometry::new(
            raw.center,
            raw.radius,
            raw.rotation_offset,
            raw.segment_order,
            raw.regions,
        )
    }
}

impl BoardGeometry {
    /// Validate the inputs and build a normalized geometry.
    pub fn new(
        center: Point2<f64>,
        radius: f64,
        rotation_offset: f64,
        segment_order: SegmentOrder,
        regions: RegionThresholds,
    ) -> Result<Self, GeometryError> {
        Self {
            center,
            radius,
            rotation_offset,
            segment_order,
            regions,
        }
        .normalize()
    }

    /// Standard wedge order and default rings around the given circle.
    pub fn standard(center: Point2<f64>, radius: f64) -> Result<Self, GeometryError> {
        Self::new(
            center,
            radius,
            0.0,
            SegmentOrder::STANDARD,
            RegionThresholds::default(),
        )
    }

    /// Rebuild an equivalent geometry with the rotation reduced to `[0, 360)`
    /// and every invariant re-checked.
    pub fn normalize(&self) -> Result<Self, GeometryError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(self.radius));
        }
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(GeometryError::NonFiniteCenter);
        }
        if !self.rotation_offset.is_finite() {
            return Err(GeometryError::NonFiniteRotation);
        }
        self.regions.validate()?;
        let segment_order = SegmentOrder::new(self.segment_order.values())?;

        Ok(Self {
            center: self.center,
            radius: self.radius,
            rotation_offset: normalize_degrees(self.rotation_offset),
            segment_order,
            regions: self.regions,
        })
    }

    /// Same board with a different rotation offset.
    pub fn with_rotation(&self, rotation_offset: f64) -> Result<Self, GeometryError> {
        Self {
            rotation_offset,
            ..*self
        }
        .normalize()
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Rotation offset in degrees, always in `[0, 360)`.
    #[inline]
    pub fn rotation_offset(&self) -> f64 {
        self.rotation_offset
    }

    #[inline]
    pub fn segment_order(&self) -> &SegmentOrder {
        &self.segment_order
    }

    #[inline]
    pub fn regions(&self) -> &RegionThresholds {
        &self.regions
    }

    /// Image-space point at `distance_factor` along the (unrotated) board
    /// angle `board_angle_deg`.
    ///
    /// Inverse of the angle/distance mapping used by the classifier, handy
    /// for overlays and synthetic impacts.
    pub fn point_at(&self, board_angle_deg: f64, distance_factor: f64) -> Point2<f64> {
        let a = (board_angle_deg - self.rotation_offset).to_radians();
        let d = distance_factor * self.radius;
        Point2::new(self.center.x + d * a.cos(), self.center.y + d * a.sin())
    }
}
