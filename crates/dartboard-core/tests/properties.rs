use dartboard_core::{classify, BoardGeometry, Point2, RegionThresholds, Ring, SegmentOrder};

fn geometries() -> Vec<BoardGeometry> {
    let tight = RegionThresholds {
        bull_inner: 0.04,
        bull_outer: 0.09,
        triple_inner: 0.58,
        triple_outer: 0.63,
        double_inner: 0.95,
        double_outer: 1.0,
    };
    let mut reversed = SegmentOrder::STANDARD.values();
    reversed.reverse();
    let reversed = SegmentOrder::new(reversed).expect("permutation");

    vec![
        BoardGeometry::standard(Point2::new(100.0, 100.0), 100.0).unwrap(),
        BoardGeometry::new(
            Point2::new(640.0, 360.0),
            287.5,
            93.0,
            SegmentOrder::STANDARD,
            tight,
        )
        .unwrap(),
        BoardGeometry::new(
            Point2::new(-20.0, 15.0),
            12.0,
            211.0,
            reversed,
            RegionThresholds::default(),
        )
        .unwrap(),
    ]
}

fn sample_angles() -> impl Iterator<Item = f64> {
    (0..72).map(|i| i as f64 * 5.0 + 1.3)
}

#[test]
fn beyond_double_outer_is_always_a_miss() {
    for g in geometries() {
        let outer = g.regions().double_outer;
        for angle in sample_angles() {
            for factor in [outer + 1e-6, outer + 0.01, 1.5, 10.0] {
                let r = classify(g.point_at(angle, factor), &g);
                assert!(!r.in_bounds, "factor {factor} angle {angle}");
                assert_eq!(r.score, 0);
                assert_eq!(r.ring(), Ring::Miss);
            }
        }
    }
}

#[test]
fn bull_regions_score_fixed_values() {
    for g in geometries() {
        let regions = *g.regions();
        for angle in sample_angles() {
            for factor in [0.0, 0.5 * regions.bull_inner, regions.bull_inner * 0.999] {
                assert_eq!(classify(g.point_at(angle, factor), &g).score, 50);
            }
            let mid = 0.5 * (regions.bull_inner + regions.bull_outer);
            for factor in [regions.bull_inner * 1.001, mid, regions.bull_outer * 0.999] {
                assert_eq!(classify(g.point_at(angle, factor), &g).score, 25);
            }
        }
    }
}

#[test]
fn rotation_offset_compensates_rotated_board() {
    // A board turned counter-clockwise (in image space) by `theta` and
    // calibrated with offset `theta` scores like the unturned board.
    let base = BoardGeometry::standard(Point2::new(300.0, 200.0), 150.0).unwrap();
    for theta in [0.0, 4.0, 17.5, 90.0, 181.0, 300.0] {
        let rotated = base.with_rotation(theta).unwrap();
        let (s, c) = (-theta).to_radians().sin_cos();
        for angle in sample_angles() {
            for factor in [0.3, 0.6, 0.9] {
                let p = base.point_at(angle, factor);
                let d = p - base.center();
                let q = base.center()
                    + nalgebra::Vector2::new(c * d.x - s * d.y, s * d.x + c * d.y);
                let before = classify(p, &base);
                let after = classify(q, &rotated);
                assert_eq!(
                    before.segment_value, after.segment_value,
                    "theta {theta} angle {angle}"
                );
                assert_eq!(before.multiplier, after.multiplier);
            }
        }
    }
}

#[test]
fn score_is_segment_times_multiplier() {
    for g in geometries() {
        for angle in sample_angles() {
            for factor in [0.2, 0.4, 0.6, 0.8, 0.9, 0.97] {
                let r = classify(g.point_at(angle, factor), &g);
                assert_eq!(r.score, r.segment_value * r.multiplier);
                assert!((1..=3).contains(&r.multiplier));
            }
        }
    }
}

#[test]
fn wedge_centres_map_to_segment_order() {
    for g in geometries() {
        let order = g.segment_order().values();
        for (i, expected) in order.iter().enumerate() {
            let p = g.point_at(SegmentOrder::center_angle(i), 0.45);
            assert_eq!(classify(p, &g).segment_value, *expected);
        }
    }
}
