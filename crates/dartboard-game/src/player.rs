use dartboard_core::ScoreResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One-based player number, stable for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// A player's remaining score and every dart they threw, busts included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    score: i32,
    throws: Vec<ScoreResult>,
}

impl Player {
    pub(crate) fn new(id: PlayerId, starting_score: i32) -> Self {
        Self {
            id,
            score: starting_score,
            throws: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Points still needed to finish.
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn throws(&self) -> &[ScoreResult] {
        &self.throws
    }

    pub(crate) fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    pub(crate) fn push_throw(&mut self, result: ScoreResult) {
        self.throws.push(result);
    }

    pub(crate) fn pop_throw(&mut self) -> Option<ScoreResult> {
        self.throws.pop()
    }

    pub(crate) fn restart(&mut self, starting_score: i32) {
        self.score = starting_score;
        self.throws.clear();
    }
}
