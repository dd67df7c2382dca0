use dartboard_core::Ring;
use serde::{Deserialize, Serialize};

use crate::game::ThrowRecord;

/// Per-player throwing statistics.
///
/// Busted darts count towards `darts` and `busts` but not towards
/// `total_scored`, so the average reflects points actually taken off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub darts: usize,
    pub total_scored: i32,
    pub doubles: usize,
    pub triples: usize,
    pub bulls: usize,
    pub busts: usize,
}

impl PlayerStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ThrowRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.darts += 1;
            match record.result.ring() {
                Ring::Double => stats.doubles += 1,
                Ring::Triple => stats.triples += 1,
                Ring::SingleBull | Ring::DoubleBull => stats.bulls += 1,
                Ring::Single | Ring::Miss => {}
            }
            if record.is_bust() {
                stats.busts += 1;
            } else {
                stats.total_scored += record.result.score;
            }
        }
        stats
    }

    /// Mean points per dart.
    pub fn average(&self) -> f64 {
        if self.darts == 0 {
            return 0.0;
        }
        self.total_scored as f64 / self.darts as f64
    }

    /// Mean points per three-dart visit.
    pub fn three_dart_average(&self) -> f64 {
        3.0 * self.average()
    }
}
