//! Core types for camera-scored darts.
//!
//! This crate is purely geometric: a validated [`BoardGeometry`], the
//! [`classify`] function mapping an impact point to a [`ScoreResult`], and
//! the planar [`Homography`] used to de-skew off-axis views. It knows
//! nothing about cameras, detectors or game rules.

mod classify;
mod geometry;
mod homography;
mod logger;
mod score;

pub use classify::{classify, wedge_index};
pub use geometry::{
    normalize_degrees, BoardGeometry, GeometryError, RegionThresholds, SegmentOrder, WEDGE_COUNT,
    WEDGE_DEG,
};
pub use homography::{homography_from_4pt, Homography};
pub use score::{Ring, ScoreInputError, ScoreResult, DOUBLE_BULL, SINGLE_BULL};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, level_from_env, LOG_ENV_VAR};

pub use nalgebra::Point2;
