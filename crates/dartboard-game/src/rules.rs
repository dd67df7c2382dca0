//! Double-out bust rules.

use dartboard_core::ScoreResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a throw was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BustReason {
    /// The throw scored more than the player had left.
    Overshoot,
    /// Exactly 1 would be left, which no double can finish.
    LeftOnOne,
    /// The throw reached zero without landing in a double.
    NoDoubleFinish,
}

impl fmt::Display for BustReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BustReason::Overshoot => "overshoot",
            BustReason::LeftOnOne => "left on 1",
            BustReason::NoDoubleFinish => "finish must be a double",
        })
    }
}

/// Effect of a single throw on a player's remaining score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Continue { remaining: i32 },
    Checkout,
    Bust(BustReason),
}

/// Judge `result` against a player who has `before` points left.
///
/// Only the double ring finishes; the bull counts as a single here.
pub fn evaluate(before: i32, result: &ScoreResult) -> Verdict {
    let tentative = before - result.score;
    match tentative {
        t if t < 0 => Verdict::Bust(BustReason::Overshoot),
        1 => Verdict::Bust(BustReason::LeftOnOne),
        0 if result.multiplier == 2 => Verdict::Checkout,
        0 => Verdict::Bust(BustReason::NoDoubleFinish),
        remaining => Verdict::Continue { remaining },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dart(s: &str) -> ScoreResult {
        s.parse().expect("notation")
    }

    #[test]
    fn plain_scoring() {
        assert_eq!(
            evaluate(501, &dart("T20")),
            Verdict::Continue { remaining: 441 }
        );
        assert_eq!(evaluate(40, &dart("MISS")), Verdict::Continue { remaining: 40 });
    }

    #[test]
    fn double_finishes() {
        assert_eq!(evaluate(40, &dart("D20")), Verdict::Checkout);
        assert_eq!(evaluate(2, &dart("D1")), Verdict::Checkout);
    }

    #[test]
    fn busts() {
        assert_eq!(
            evaluate(40, &dart("DB")),
            Verdict::Bust(BustReason::Overshoot)
        );
        assert_eq!(
            evaluate(21, &dart("20")),
            Verdict::Bust(BustReason::LeftOnOne)
        );
        assert_eq!(
            evaluate(20, &dart("20")),
            Verdict::Bust(BustReason::NoDoubleFinish)
        );
        assert_eq!(
            evaluate(60, &dart("T20")),
            Verdict::Bust(BustReason::NoDoubleFinish)
        );
    }

    #[test]
    fn bullseye_is_not_a_double() {
        assert_eq!(
            evaluate(50, &dart("DB")),
            Verdict::Bust(BustReason::NoDoubleFinish)
        );
    }
}
