//! Turn, bust and finish state machine.
//!
//! This is the only place that mutates player scores. Every applied throw is
//! logged together with the state it replaced, so undo is exact.

use dartboard_core::ScoreResult;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::checkout::suggest_checkout;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::player::{Player, PlayerId};
use crate::rules::{evaluate, BustReason, Verdict};
use crate::stats::PlayerStats;

/// Darts per visit.
pub const THROWS_PER_TURN: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    InProgress,
    Won(PlayerId),
}

/// What a single throw did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThrowOutcome {
    /// Points taken off; the same player throws again.
    Scored { remaining: i32 },
    /// Points taken off with the last dart of the visit; next player is up.
    TurnOver { remaining: i32 },
    /// Throw discarded, score unchanged, next player is up.
    Bust { reason: BustReason, remaining: i32 },
    Won { player: PlayerId },
}

/// One applied throw and the turn state it replaced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThrowRecord {
    pub player: PlayerId,
    pub result: ScoreResult,
    pub outcome: ThrowOutcome,
    player_index: usize,
    score_before: i32,
    throws_left_before: u8,
}

impl ThrowRecord {
    pub fn score_before(&self) -> i32 {
        self.score_before
    }

    pub fn is_bust(&self) -> bool {
        matches!(self.outcome, ThrowOutcome::Bust { .. })
    }
}

/// A throw removed by [`Game::undo_last_throw`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UndoneThrow {
    pub player: PlayerId,
    pub result: ScoreResult,
    pub outcome: ThrowOutcome,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGame")]
pub struct Game {
    players: Vec<Player>,
    current: usize,
    throws_left: u8,
    state: GameState,
    starting_score: i32,
    history: Vec<ThrowRecord>,
}

#[derive(Deserialize)]
struct RawGame {
    players: Vec<Player>,
    current: usize,
    throws_left: u8,
    state: GameState,
    starting_score: i32,
    history: Vec<ThrowRecord>,
}

impl TryFrom<RawGame> for Game {
    type Error = GameError;

    fn try_from(raw: RawGame) -> Result<Self, Self::Error> {
        let invalid = |msg: String| -> Result<Self, GameError> {
            Err(GameError::InvalidState(msg))
        };
        let n = raw.players.len();
        if n == 0 {
            return invalid("no players".into());
        }
        if raw.current >= n {
            return invalid(format!("current player {} of {n}", raw.current));
        }
        let throws_left_ok = match raw.state {
            GameState::InProgress => (1..=THROWS_PER_TURN).contains(&raw.throws_left),
            GameState::Won(_) => raw.throws_left <= THROWS_PER_TURN,
        };
        if !throws_left_ok {
            return invalid(format!("{} throws left in the visit", raw.throws_left));
        }
        if let GameState::Won(id) = raw.state {
            if !raw.players.iter().any(|p| p.id() == id) {
                return invalid(format!("winner {id} is not playing"));
            }
        }
        if raw.starting_score < 2 {
            return invalid(format!("starting score {}", raw.starting_score));
        }
        for (i, r) in raw.history.iter().enumerate() {
            if r.player_index >= n || raw.players[r.player_index].id() != r.player {
                return invalid(format!("throw {i} names an unknown player"));
            }
            if !(1..=THROWS_PER_TURN).contains(&r.throws_left_before) {
                return invalid(format!(
                    "throw {i} left {} darts in the visit",
                    r.throws_left_before
                ));
            }
        }
        Ok(Self {
            players: raw.players,
            current: raw.current,
            throws_left: raw.throws_left,
            state: raw.state,
            starting_score: raw.starting_score,
            history: raw.history,
        })
    }
}

/// Reject results no dart can produce, e.g. a hand-built `ScoreResult`
/// whose score is not segment × multiplier.
fn check_throw(result: &ScoreResult) -> Result<(), GameError> {
    let consistent = ScoreResult::manual(result.segment_value, result.multiplier)
        .is_ok_and(|expected| expected.score == result.score);
    if consistent {
        Ok(())
    } else {
        Err(GameError::InvalidThrow {
            segment_value: result.segment_value,
            multiplier: result.multiplier,
            score: result.score,
        })
    }
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let players = (1..=config.players)
            .map(|n| Player::new(PlayerId(n), config.starting_score))
            .collect();
        info!(
            "new game: {} players from {}",
            config.players, config.starting_score
        );
        Ok(Self {
            players,
            current: 0,
            throws_left: THROWS_PER_TURN,
            state: GameState::InProgress,
            starting_score: config.starting_score,
            history: Vec::new(),
        })
    }

    /// Score one dart for the player whose turn it is.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, result), fields(score = result.score))
    )]
    pub fn apply_throw(&mut self, result: ScoreResult) -> Result<ThrowOutcome, GameError> {
        if let GameState::Won(winner) = self.state {
            return Err(GameError::GameAlreadyWon { winner });
        }
        check_throw(&result)?;

        let index = self.current;
        let throws_left_before = self.throws_left;
        let player = &mut self.players[index];
        let id = player.id();
        let before = player.score();
        player.push_throw(result);

        let outcome = match evaluate(before, &result) {
            Verdict::Bust(reason) => {
                warn!("{id} bust on {result} ({reason}), stays on {before}");
                self.next_player();
                ThrowOutcome::Bust {
                    reason,
                    remaining: before,
                }
            }
            Verdict::Checkout => {
                player.set_score(0);
                self.throws_left -= 1;
                self.state = GameState::Won(id);
                info!("{id} wins with {result}");
                ThrowOutcome::Won { player: id }
            }
            Verdict::Continue { remaining } => {
                player.set_score(remaining);
                self.throws_left -= 1;
                debug!("{id} threw {result}, {remaining} left");
                if self.throws_left == 0 {
                    self.next_player();
                    ThrowOutcome::TurnOver { remaining }
                } else {
                    ThrowOutcome::Scored { remaining }
                }
            }
        };

        self.history.push(ThrowRecord {
            player: id,
            result,
            outcome,
            player_index: index,
            score_before: before,
            throws_left_before,
        });
        Ok(outcome)
    }

    /// Revert the most recent throw, whoever threw it.
    ///
    /// Score, turn and throws-left return to their values before that throw;
    /// undoing a winning dart resumes the game.
    pub fn undo_last_throw(&mut self) -> Result<UndoneThrow, GameError> {
        let record = self.history.pop().ok_or(GameError::NothingToUndo)?;
        let player = &mut self.players[record.player_index];
        player.pop_throw();
        player.set_score(record.score_before);
        self.current = record.player_index;
        self.throws_left = record.throws_left_before;
        self.state = GameState::InProgress;
        debug!(
            "undo {} by {}, back to {}",
            record.result, record.player, record.score_before
        );
        Ok(UndoneThrow {
            player: record.player,
            result: record.result,
            outcome: record.outcome,
        })
    }

    /// Start over with the same players.
    pub fn reset(&mut self, starting_score: i32) -> Result<(), GameError> {
        GameConfig {
            starting_score,
            players: self.players.len() as u32,
        }
        .validate()?;
        for p in &mut self.players {
            p.restart(starting_score);
        }
        self.current = 0;
        self.throws_left = THROWS_PER_TURN;
        self.state = GameState::InProgress;
        self.starting_score = starting_score;
        self.history.clear();
        info!("game reset to {starting_score}");
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn throws_left(&self) -> u8 {
        self.throws_left
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.state {
            GameState::Won(id) => Some(id),
            GameState::InProgress => None,
        }
    }

    pub fn starting_score(&self) -> i32 {
        self.starting_score
    }

    /// Every applied throw, oldest first.
    pub fn history(&self) -> &[ThrowRecord] {
        &self.history
    }

    /// Finish route for the current player with the darts left this visit.
    pub fn checkout_hint(&self) -> Option<Vec<ScoreResult>> {
        if self.state != GameState::InProgress {
            return None;
        }
        suggest_checkout(self.current_player().score(), self.throws_left as usize)
    }

    pub fn stats(&self, id: PlayerId) -> Option<PlayerStats> {
        self.player(id)?;
        Some(PlayerStats::from_records(
            self.history.iter().filter(|r| r.player == id),
        ))
    }

    fn next_player(&mut self) {
        self.current = (self.current + 1) % self.players.len();
        self.throws_left = THROWS_PER_TURN;
    }
}
