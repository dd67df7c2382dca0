//! One game fed by any number of calibrated cameras.

use std::collections::BTreeMap;

use dartboard_calib::{Calibration, CalibrationStore, StoreError};
use dartboard_core::{Point2, ScoreResult};
use dartboard_game::{Game, GameConfig, GameError, ThrowOutcome, UndoneThrow};
use log::{debug, info};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("camera '{0}' is not calibrated")]
    UnknownCamera(String),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Routes impacts from every camera through that camera's calibration into
/// a single [`Game`].
///
/// All mutation goes through `&mut self`; callers with several detector
/// threads serialize their events before they reach the session.
#[derive(Clone, Debug)]
pub struct ScoringSession {
    game: Game,
    cameras: BTreeMap<String, Calibration>,
}

impl ScoringSession {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            cameras: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, SessionError> {
        Ok(Self::new(Game::new(config)?))
    }

    /// Session with every camera from `store` already calibrated.
    pub fn from_store(store: &CalibrationStore, config: &GameConfig) -> Result<Self, SessionError> {
        let mut session = Self::from_config(config)?;
        for camera in store.cameras() {
            let calibration = store.calibration(camera)?;
            session.cameras.insert(camera.to_string(), calibration);
        }
        info!("session with {} calibrated cameras", session.cameras.len());
        Ok(session)
    }

    /// Replace a camera's calibration wholesale.
    pub fn set_calibration(
        &mut self,
        camera: impl Into<String>,
        calibration: Calibration,
    ) -> Option<Calibration> {
        let camera = camera.into();
        info!("camera '{camera}' recalibrated");
        self.cameras.insert(camera, calibration)
    }

    pub fn remove_calibration(&mut self, camera: &str) -> Option<Calibration> {
        self.cameras.remove(camera)
    }

    pub fn calibration(&self, camera: &str) -> Option<&Calibration> {
        self.cameras.get(camera)
    }

    pub fn cameras(&self) -> impl Iterator<Item = &str> {
        self.cameras.keys().map(String::as_str)
    }

    /// Score an impact seen by `camera` and apply it to the game.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn record_impact(
        &mut self,
        camera: &str,
        point: Point2<f64>,
    ) -> Result<(ScoreResult, ThrowOutcome), SessionError> {
        let calibration = self
            .cameras
            .get(camera)
            .ok_or_else(|| SessionError::UnknownCamera(camera.to_string()))?;
        let result = calibration.classify(point);
        debug!(
            "camera '{camera}': ({:.1}, {:.1}) -> {result} (df={:.3}, angle={:.1})",
            point.x, point.y, result.distance_factor, result.angle_deg
        );
        let outcome = self.game.apply_throw(result)?;
        Ok((result, outcome))
    }

    /// Apply a throw entered by hand, e.g. a correction.
    pub fn record_manual(&mut self, result: ScoreResult) -> Result<ThrowOutcome, SessionError> {
        Ok(self.game.apply_throw(result)?)
    }

    pub fn undo(&mut self) -> Result<UndoneThrow, SessionError> {
        Ok(self.game.undo_last_throw()?)
    }

    /// New game with the same players; calibrations are kept.
    pub fn reset(&mut self, starting_score: i32) -> Result<(), SessionError> {
        Ok(self.game.reset(starting_score)?)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
}
