//! 501-style darts scoring.
//!
//! [`Game`] consumes already-classified [`ScoreResult`]s and applies the
//! double-out rules: a throw that would leave a negative score, exactly 1,
//! or zero without a double is a bust. Every throw can be undone.

mod checkout;
mod config;
mod error;
mod game;
mod player;
mod rules;
mod stats;

pub use checkout::{suggest_checkout, MAX_CHECKOUT};
pub use config::{GameConfig, GameConfigIoError};
pub use error::GameError;
pub use game::{Game, GameState, ThrowOutcome, ThrowRecord, UndoneThrow, THROWS_PER_TURN};
pub use player::{Player, PlayerId};
pub use rules::{evaluate, BustReason, Verdict};
pub use stats::PlayerStats;

pub use dartboard_core::ScoreResult;
