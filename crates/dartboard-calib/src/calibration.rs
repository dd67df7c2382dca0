use dartboard_core::{classify, BoardGeometry, Homography, Point2, ScoreResult};
use serde::{Deserialize, Serialize};

/// A candidate board circle handed over by an external detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2<f64>,
    pub radius: f64,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            center: Point2::new(cx, cy),
            radius,
        }
    }
}

/// Calibration output shared by every strategy: a board geometry plus an
/// optional de-skewing transform from camera pixels into the geometry's
/// frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    pub geometry: BoardGeometry,
    pub perspective: Option<Homography>,
}

impl Calibration {
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            perspective: None,
        }
    }

    pub fn with_perspective(geometry: BoardGeometry, perspective: Homography) -> Self {
        Self {
            geometry,
            perspective: Some(perspective),
        }
    }

    /// Map a camera-space point into the geometry's frame.
    #[inline]
    pub fn rectify(&self, p: Point2<f64>) -> Point2<f64> {
        match &self.perspective {
            Some(h) => h.apply(p),
            None => p,
        }
    }

    /// Rectify (if needed) and score a camera-space impact point.
    pub fn classify(&self, p: Point2<f64>) -> ScoreResult {
        classify(self.rectify(p), &self.geometry)
    }
}

impl From<BoardGeometry> for Calibration {
    fn from(geometry: BoardGeometry) -> Self {
        Self::new(geometry)
    }
}
