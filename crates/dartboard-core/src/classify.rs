//! Impact point -> score mapping.

use crate::geometry::{normalize_degrees, BoardGeometry, WEDGE_COUNT, WEDGE_DEG};
use crate::score::{ScoreResult, DOUBLE_BULL, SINGLE_BULL};
use nalgebra::Point2;

/// Score an impact point against a calibrated board.
///
/// Regions are resolved innermost first: double bull, single bull, off-board,
/// then the numbered wedge with the double ring checked before the triple
/// ring (both bounds inclusive). Never fails; the geometry is valid by
/// construction, and a non-finite point scores as off-board.
pub fn classify(point: Point2<f64>, geometry: &BoardGeometry) -> ScoreResult {
    let center = geometry.center();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let distance_factor = (dx * dx + dy * dy).sqrt() / geometry.radius();

    let angle = normalize_degrees(
        normalize_degrees(dy.atan2(dx).to_degrees()) + geometry.rotation_offset(),
    );

    let regions = geometry.regions();
    if distance_factor <= regions.bull_inner {
        return ScoreResult::hit(DOUBLE_BULL, 1, angle, distance_factor);
    }
    if distance_factor <= regions.bull_outer {
        return ScoreResult::hit(SINGLE_BULL, 1, angle, distance_factor);
    }
    if distance_factor.is_nan() || distance_factor > regions.double_outer {
        return ScoreResult::miss(angle, distance_factor);
    }

    let segment_value = geometry.segment_order().value_at(wedge_index(angle));
    let multiplier = if (regions.double_inner..=regions.double_outer).contains(&distance_factor) {
        2
    } else if (regions.triple_inner..=regions.triple_outer).contains(&distance_factor) {
        3
    } else {
        1
    };

    ScoreResult::hit(segment_value, multiplier, angle, distance_factor)
}

/// Wedge index for a rotated board angle; boundaries sit at `9 + 18k` degrees.
#[inline]
pub fn wedge_index(angle_deg: f64) -> usize {
    let shifted = normalize_degrees(angle_deg + 0.5 * WEDGE_DEG);
    ((shifted / WEDGE_DEG).floor() as usize).min(WEDGE_COUNT - 1)
}
