//! Dartboard calibration.
//!
//! Two strategies produce the same [`Calibration`]:
//! - circle-seeded: an external detector reports the outer board circle and
//!   the user trims the rotation offset in [`ROTATION_STEP_DEG`] steps,
//! - four-point: the user clicks four labeled wedge boundaries on the outer
//!   edge; optionally a perspective transform is fitted through them.
//!
//! Calibrations are persisted per camera in a [`CalibrationStore`].

mod builder;
mod calibration;
mod error;
mod io;
mod labels;

pub use builder::{CalibrationBuilder, ROTATION_STEP_DEG};
pub use calibration::{Calibration, Circle};
pub use error::CalibrationError;
pub use io::{CalibrationIoError, CalibrationRecord, CalibrationStore, StoreError};
pub use labels::{BoundaryLabel, LabelParseError, LabeledPoint, ReferenceLayout};
