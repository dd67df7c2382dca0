use crate::player::PlayerId;

/// Errors returned by [`Game`](crate::Game) operations.
///
/// None of them leave the game in a modified state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no throws to undo")]
    NothingToUndo,
    #[error("game already won by {winner}")]
    GameAlreadyWon { winner: PlayerId },
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
    #[error("inconsistent throw: segment {segment_value} x{multiplier} cannot score {score}")]
    InvalidThrow {
        segment_value: i32,
        multiplier: i32,
        score: i32,
    },
    #[error("invalid saved game: {0}")]
    InvalidState(String),
}
