use dartboard_core::GeometryError;

use crate::labels::BoundaryLabel;

/// Errors returned by [`CalibrationBuilder`](crate::CalibrationBuilder).
///
/// All of them are recoverable: the caller re-runs calibration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("no board circle detected")]
    NoCircleDetected,
    #[error("four-point calibration needs exactly 4 points, got {got}")]
    InvalidPointCount { got: usize },
    #[error("calibration points are degenerate (collinear or zero radius)")]
    DegenerateCalibration,
    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),
    #[error("{label} is not a boundary between neighbouring wedges")]
    UnknownBoundary { label: BoundaryLabel },
    #[error("no calibration point labeled {reference}")]
    MissingReferencePoint { reference: BoundaryLabel },
}
