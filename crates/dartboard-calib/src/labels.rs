//! Wedge-boundary labels for manual reference points.
//!
//! Which four boundaries a user is asked to click is configuration, not
//! geometry: any four boundaries between neighbouring wedges work, as long
//! as one of them is the designated reference for the rotation offset.

use dartboard_core::{Point2, SegmentOrder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boundary between two neighbouring wedges, e.g. `20/1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundaryLabel {
    pub first: i32,
    pub second: i32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid boundary label '{0}' (expected e.g. \"20/1\")")]
pub struct LabelParseError(pub String);

impl BoundaryLabel {
    pub const fn new(first: i32, second: i32) -> Self {
        Self { first, second }
    }

    /// Same boundary regardless of the order the wedges were named in.
    pub fn same_boundary(&self, other: &BoundaryLabel) -> bool {
        (self.first, self.second) == (other.first, other.second)
            || (self.first, self.second) == (other.second, other.first)
    }

    /// Unrotated boundary angle in `order`, if the two wedges are neighbours.
    pub fn angle_in(&self, order: &SegmentOrder) -> Option<f64> {
        order.boundary_angle(self.first, self.second)
    }
}

impl fmt::Display for BoundaryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}

impl FromStr for BoundaryLabel {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || LabelParseError(s.to_string());
        let (a, b) = s
            .trim()
            .split_once(['/', '-', ':'])
            .ok_or_else(err)?;
        let first = a.trim().parse().map_err(|_| err())?;
        let second = b.trim().parse().map_err(|_| err())?;
        Ok(Self { first, second })
    }
}

impl TryFrom<String> for BoundaryLabel {
    type Error = LabelParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BoundaryLabel> for String {
    fn from(label: BoundaryLabel) -> Self {
        label.to_string()
    }
}

/// A user-clicked point on a known wedge boundary at the board's outer edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub label: BoundaryLabel,
    pub point: Point2<f64>,
}

impl LabeledPoint {
    pub fn new(label: BoundaryLabel, x: f64, y: f64) -> Self {
        Self {
            label,
            point: Point2::new(x, y),
        }
    }
}

/// The four boundaries a user is prompted for, in prompt order, and the one
/// that fixes the rotation offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLayout {
    pub reference: BoundaryLabel,
    pub labels: [BoundaryLabel; 4],
}

impl Default for ReferenceLayout {
    fn default() -> Self {
        Self {
            reference: BoundaryLabel::new(20, 1),
            labels: [
                BoundaryLabel::new(20, 1),
                BoundaryLabel::new(13, 6),
                BoundaryLabel::new(11, 14),
                BoundaryLabel::new(3, 17),
            ],
        }
    }
}

impl ReferenceLayout {
    /// Attach the layout's labels, in prompt order, to four clicked points.
    pub fn label_points(&self, points: [Point2<f64>; 4]) -> [LabeledPoint; 4] {
        std::array::from_fn(|i| LabeledPoint {
            label: self.labels[i],
            point: points[i],
        })
    }

    /// First label that is not a boundary in `order`, if any.
    pub fn first_invalid(&self, order: &SegmentOrder) -> Option<BoundaryLabel> {
        std::iter::once(self.reference)
            .chain(self.labels)
            .find(|l| l.angle_in(order).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        let want = BoundaryLabel::new(20, 1);
        assert_eq!("20/1".parse::<BoundaryLabel>().unwrap(), want);
        assert_eq!(" 20-1 ".parse::<BoundaryLabel>().unwrap(), want);
        assert_eq!("20 : 1".parse::<BoundaryLabel>().unwrap(), want);
        assert!("20".parse::<BoundaryLabel>().is_err());
        assert!("a/b".parse::<BoundaryLabel>().is_err());
    }

    #[test]
    fn boundary_ignores_naming_order() {
        let a = BoundaryLabel::new(18, 4);
        assert!(a.same_boundary(&BoundaryLabel::new(4, 18)));
        assert!(!a.same_boundary(&BoundaryLabel::new(4, 13)));
    }

    #[test]
    fn default_layout_is_valid_for_standard_board() {
        let layout = ReferenceLayout::default();
        assert_eq!(layout.first_invalid(&SegmentOrder::STANDARD), None);

        let broken = ReferenceLayout {
            labels: [
                BoundaryLabel::new(20, 1),
                BoundaryLabel::new(18, 11),
                BoundaryLabel::new(11, 14),
                BoundaryLabel::new(3, 17),
            ],
            ..layout
        };
        assert_eq!(
            broken.first_invalid(&SegmentOrder::STANDARD),
            Some(BoundaryLabel::new(18, 11))
        );
    }

    #[test]
    fn label_serializes_as_string() {
        let json = serde_json::to_string(&BoundaryLabel::new(13, 6)).unwrap();
        assert_eq!(json, "\"13/6\"");
        let back: BoundaryLabel = serde_json::from_str("\"8-11\"").unwrap();
        assert_eq!(back, BoundaryLabel::new(8, 11));
    }
}
