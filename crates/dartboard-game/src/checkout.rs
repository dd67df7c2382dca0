//! Finish suggestions.

use dartboard_core::{ScoreResult, DOUBLE_BULL, SINGLE_BULL};

/// Highest score that can still be finished in one visit.
pub const MAX_CHECKOUT: i32 = 160;

/// Every scoring dart, highest score first; singles before doubles and
/// triples of equal value.
fn setup_darts() -> Vec<ScoreResult> {
    let mut darts: Vec<ScoreResult> = (1..=20)
        .flat_map(|seg| (1..=3).map(move |m| (seg, m)))
        .chain([(SINGLE_BULL, 1), (DOUBLE_BULL, 1)])
        .filter_map(|(seg, m)| ScoreResult::manual(seg, m).ok())
        .collect();
    darts.sort_by(|a, b| b.score.cmp(&a.score).then(a.multiplier.cmp(&b.multiplier)));
    darts
}

fn finishing_double(remaining: i32) -> Option<ScoreResult> {
    if remaining % 2 != 0 {
        return None;
    }
    ScoreResult::manual(remaining / 2, 2).ok()
}

/// Fewest-dart route to finish `remaining` on a double, using at most
/// `darts` darts.
///
/// Among routes of equal length the one with the highest first dart wins,
/// then the highest second dart. Returns `None` when no route exists.
pub fn suggest_checkout(remaining: i32, darts: usize) -> Option<Vec<ScoreResult>> {
    if !(2..=MAX_CHECKOUT).contains(&remaining) || darts == 0 {
        return None;
    }
    if let Some(d) = finishing_double(remaining) {
        return Some(vec![d]);
    }
    if darts < 2 {
        return None;
    }

    let setups = setup_darts();
    for first in &setups {
        if let Some(d) = finishing_double(remaining - first.score) {
            return Some(vec![*first, d]);
        }
    }
    if darts < 3 {
        return None;
    }
    for first in &setups {
        for second in &setups {
            if let Some(d) = finishing_double(remaining - first.score - second.score) {
                return Some(vec![*first, *second, d]);
            }
        }
    }
    None
}
