//! Per-dart score value and its darts notation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value of a single bull.
pub const SINGLE_BULL: i32 = 25;
/// Value of a double bull.
pub const DOUBLE_BULL: i32 = 50;

/// Board region a dart landed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ring {
    DoubleBull,
    SingleBull,
    Single,
    Double,
    Triple,
    Miss,
}

/// Errors for manually entered throws.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreInputError {
    #[error("unrecognized throw '{0}' (expected e.g. T20, D16, 7, SB, DB, MISS)")]
    Unrecognized(String),
    #[error("no such throw: segment {segment_value} x{multiplier}")]
    InvalidThrow { segment_value: i32, multiplier: i32 },
}

/// Result of scoring one dart.
///
/// `score` is always `segment_value * multiplier`; bull values are already
/// final and carry multiplier 1. `angle_deg` and `distance_factor` are
/// diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub segment_value: i32,
    pub multiplier: i32,
    pub score: i32,
    pub angle_deg: f64,
    pub distance_factor: f64,
    pub in_bounds: bool,
}

impl ScoreResult {
    pub(crate) fn miss(angle_deg: f64, distance_factor: f64) -> Self {
        Self {
            segment_value: 0,
            multiplier: 1,
            score: 0,
            angle_deg,
            distance_factor,
            in_bounds: false,
        }
    }

    pub(crate) fn hit(
        segment_value: i32,
        multiplier: i32,
        angle_deg: f64,
        distance_factor: f64,
    ) -> Self {
        Self {
            segment_value,
            multiplier,
            score: segment_value * multiplier,
            angle_deg,
            distance_factor,
            in_bounds: true,
        }
    }

    /// A throw entered by hand (no impact coordinate).
    ///
    /// `segment_value` 0 is a miss; 25 and 50 are the bulls and must use
    /// multiplier 1.
    pub fn manual(segment_value: i32, multiplier: i32) -> Result<Self, ScoreInputError> {
        let valid = match segment_value {
            0 | SINGLE_BULL | DOUBLE_BULL => multiplier == 1,
            1..=20 => (1..=3).contains(&multiplier),
            _ => false,
        };
        if !valid {
            return Err(ScoreInputError::InvalidThrow {
                segment_value,
                multiplier,
            });
        }
        if segment_value == 0 {
            return Ok(Self::miss(0.0, 0.0));
        }
        Ok(Self::hit(segment_value, multiplier, 0.0, 0.0))
    }

    pub fn ring(&self) -> Ring {
        if !self.in_bounds || self.segment_value == 0 {
            return Ring::Miss;
        }
        match (self.segment_value, self.multiplier) {
            (DOUBLE_BULL, _) => Ring::DoubleBull,
            (SINGLE_BULL, _) => Ring::SingleBull,
            (_, 2) => Ring::Double,
            (_, 3) => Ring::Triple,
            _ => Ring::Single,
        }
    }

    /// True when the dart counts as a double for finishing purposes.
    #[inline]
    pub fn is_double(&self) -> bool {
        self.multiplier == 2
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ring() {
            Ring::Miss => f.write_str("MISS"),
            Ring::SingleBull => f.write_str("SB"),
            Ring::DoubleBull => f.write_str("DB"),
            Ring::Single => write!(f, "{}", self.segment_value),
            Ring::Double => write!(f, "D{}", self.segment_value),
            Ring::Triple => write!(f, "T{}", self.segment_value),
        }
    }
}

impl FromStr for ScoreResult {
    type Err = ScoreInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        let unrecognized = || ScoreInputError::Unrecognized(s.trim().to_string());

        match token.as_str() {
            "MISS" | "M" | "0" => return Self::manual(0, 1),
            "SB" | "BULL" | "25" => return Self::manual(SINGLE_BULL, 1),
            "DB" | "BULLSEYE" | "50" => return Self::manual(DOUBLE_BULL, 1),
            _ => {}
        }

        let (multiplier, digits) = match token.as_bytes().first() {
            Some(b'S') => (1, &token[1..]),
            Some(b'D') => (2, &token[1..]),
            Some(b'T') => (3, &token[1..]),
            Some(_) => (1, token.as_str()),
            None => return Err(unrecognized()),
        };
        let segment_value: i32 = digits.parse().map_err(|_| unrecognized())?;
        if !(1..=20).contains(&segment_value) {
            return Err(unrecognized());
        }
        Self::manual(segment_value, multiplier)
    }
}
