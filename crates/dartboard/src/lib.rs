//! Facade crate for the `dartboard-*` workspace.
//!
//! Cameras and detectors live elsewhere; this workspace turns what they
//! report (a board circle, clicked reference points, impact coordinates)
//! into scores and a running 501 game.
//!
//! ## Quickstart
//!
//! ```
//! use dartboard::calib::{CalibrationBuilder, Circle};
//! use dartboard::game::{GameConfig, ThrowOutcome};
//! use dartboard::{Point2, ScoringSession};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Board centred at (320, 240), 200 px to the outer edge, 20 at the top.
//! let geometry = CalibrationBuilder::default()
//!     .from_circle(Some(Circle::new(320.0, 240.0, 200.0)), 90.0)?;
//!
//! let mut session = ScoringSession::from_config(&GameConfig::default())?;
//! session.set_calibration("front", geometry.into());
//!
//! // 120 px straight up from the centre: treble 20.
//! let (score, outcome) = session.record_impact("front", Point2::new(320.0, 120.0))?;
//! assert_eq!(score.to_string(), "T20");
//! assert_eq!(outcome, ThrowOutcome::Scored { remaining: 441 });
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `dartboard::core`: board geometry, score classification, homography, logger.
//! - `dartboard::calib`: circle-seeded and four-point calibration, per-camera records.
//! - `dartboard::game`: turn/bust/finish state machine, checkouts, statistics.
//! - [`ScoringSession`]: one game fed by several calibrated cameras.

pub use dartboard_calib as calib;
pub use dartboard_core as core;
pub use dartboard_game as game;

pub use dartboard_calib::{Calibration, CalibrationBuilder};
pub use dartboard_core::{classify, BoardGeometry, Point2, ScoreResult};
pub use dartboard_game::{Game, ThrowOutcome};

mod session;

pub use session::{ScoringSession, SessionError};
