//! Calibration strategies producing a [`BoardGeometry`].
//!
//! Two paths, one output type:
//! - circle-seeded: a detector supplies the outer circle, the user trims the
//!   rotation until the overlay matches the printed numbers;
//! - four-point: the user clicks four labeled wedge boundaries on the outer
//!   edge, optionally with a perspective correction fitted through them.

use dartboard_core::{
    homography_from_4pt, normalize_degrees, BoardGeometry, Point2, RegionThresholds, SegmentOrder,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::calibration::{Calibration, Circle};
use crate::error::CalibrationError;
use crate::labels::{LabeledPoint, ReferenceLayout};

/// Rotation trim step used by interactive alignment, in degrees.
pub const ROTATION_STEP_DEG: f64 = 5.0;

/// Relative spread below which four points count as collinear.
const COLLINEAR_EPS: f64 = 1e-9;

/// Builds board geometries for a fixed wedge order, ring layout and
/// reference-point layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBuilder {
    #[serde(default)]
    pub segment_order: SegmentOrder,
    #[serde(default)]
    pub regions: RegionThresholds,
    #[serde(default)]
    pub layout: ReferenceLayout,
}

impl CalibrationBuilder {
    pub fn new(segment_order: SegmentOrder, regions: RegionThresholds) -> Self {
        Self {
            segment_order,
            regions,
            layout: ReferenceLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: ReferenceLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Circle-seeded calibration.
    ///
    /// Centre and radius are taken verbatim from the detector's circle;
    /// `rotation_offset` is the user's final trim.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn from_circle(
        &self,
        circle: Option<Circle>,
        rotation_offset: f64,
    ) -> Result<BoardGeometry, CalibrationError> {
        let Some(circle) = circle else {
            warn!("circle calibration requested without a detected circle");
            return Err(CalibrationError::NoCircleDetected);
        };
        let geometry = BoardGeometry::new(
            circle.center,
            circle.radius,
            rotation_offset,
            self.segment_order,
            self.regions,
        )?;
        debug!(
            "circle calibration: center=({:.2}, {:.2}) r={:.2} rot={:.1}",
            circle.center.x,
            circle.center.y,
            circle.radius,
            geometry.rotation_offset()
        );
        Ok(geometry)
    }

    /// Trim the rotation of an existing geometry by `delta_deg`.
    pub fn adjust_rotation(
        geometry: &BoardGeometry,
        delta_deg: f64,
    ) -> Result<BoardGeometry, CalibrationError> {
        Ok(geometry.with_rotation(geometry.rotation_offset() + delta_deg)?)
    }

    /// Four-point calibration without perspective correction.
    ///
    /// The centre is the mean of the points and the radius their mean
    /// distance to it; this is exact when the four boundaries are evenly
    /// spread around the board and an approximation otherwise.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, points), fields(n = points.len()))
    )]
    pub fn from_four_points(
        &self,
        points: &[LabeledPoint],
    ) -> Result<BoardGeometry, CalibrationError> {
        self.fit_four_points(points).map(|(geometry, _)| geometry)
    }

    /// Four-point calibration with a perspective transform.
    ///
    /// The transform maps each clicked point onto the geometry's outer circle
    /// at the angle its label prescribes, so impact points must be passed
    /// through [`Calibration::rectify`] before classification.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, points), fields(n = points.len()))
    )]
    pub fn from_four_points_rectified(
        &self,
        points: &[LabeledPoint],
    ) -> Result<Calibration, CalibrationError> {
        let (geometry, pts) = self.fit_four_points(points)?;

        let src = pts.map(|p| p.point);
        let mut dst = [Point2::origin(); 4];
        for (slot, p) in dst.iter_mut().zip(pts.iter()) {
            let angle = p
                .label
                .angle_in(&self.segment_order)
                .ok_or(CalibrationError::UnknownBoundary { label: p.label })?;
            *slot = geometry.point_at(angle, 1.0);
        }

        let Some(h) = homography_from_4pt(&src, &dst) else {
            warn!("four-point perspective fit is singular");
            return Err(CalibrationError::DegenerateCalibration);
        };
        debug!("four-point perspective: {:?}", h.to_array());
        Ok(Calibration::with_perspective(geometry, h))
    }

    fn fit_four_points(
        &self,
        points: &[LabeledPoint],
    ) -> Result<(BoardGeometry, [LabeledPoint; 4]), CalibrationError> {
        let pts: [LabeledPoint; 4] =
            points
                .try_into()
                .map_err(|_| CalibrationError::InvalidPointCount {
                    got: points.len(),
                })?;

        for p in &pts {
            if p.label.angle_in(&self.segment_order).is_none() {
                return Err(CalibrationError::UnknownBoundary { label: p.label });
            }
        }

        let xy = pts.map(|p| p.point);
        if xy.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) || all_collinear(&xy) {
            warn!("four-point calibration rejected: collinear or non-finite points");
            return Err(CalibrationError::DegenerateCalibration);
        }

        let center = Point2::new(
            xy.iter().map(|p| p.x).sum::<f64>() / 4.0,
            xy.iter().map(|p| p.y).sum::<f64>() / 4.0,
        );
        let radius = xy.iter().map(|p| (p - center).norm()).sum::<f64>() / 4.0;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CalibrationError::DegenerateCalibration);
        }

        let reference = self.layout.reference;
        let anchor = pts
            .iter()
            .find(|p| p.label.same_boundary(&reference))
            .ok_or(CalibrationError::MissingReferencePoint { reference })?;
        let expected = anchor
            .label
            .angle_in(&self.segment_order)
            .ok_or(CalibrationError::UnknownBoundary {
                label: anchor.label,
            })?;
        let d = anchor.point - center;
        let measured = normalize_degrees(d.y.atan2(d.x).to_degrees());
        let rotation_offset = normalize_degrees(expected - measured);

        let geometry = BoardGeometry::new(
            center,
            radius,
            rotation_offset,
            self.segment_order,
            self.regions,
        )?;
        debug!(
            "four-point calibration: center=({:.2}, {:.2}) r={:.2} rot={:.2} (ref {} at {:.2} deg)",
            center.x, center.y, radius, rotation_offset, reference, measured
        );
        Ok((geometry, pts))
    }
}

/// True when the points span (numerically) no area: the smaller eigenvalue
/// of their scatter matrix vanishes relative to the larger one.
fn all_collinear(pts: &[Point2<f64>; 4]) -> bool {
    let n = pts.len() as f64;
    let mx = pts.iter().map(|p| p.x).sum::<f64>() / n;
    let my = pts.iter().map(|p| p.y).sum::<f64>() / n;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for p in pts {
        let (dx, dy) = (p.x - mx, p.y - my);
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    let trace = sxx + syy;
    if trace <= 0.0 {
        return true;
    }
    let det = sxx * syy - sxy * sxy;
    det <= COLLINEAR_EPS * trace * trace
}
