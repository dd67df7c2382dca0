use approx::assert_abs_diff_eq;
use dartboard_calib::{
    BoundaryLabel, CalibrationBuilder, CalibrationError, LabeledPoint, ReferenceLayout,
};
use dartboard_core::{classify, BoardGeometry, Homography, Point2, RegionThresholds, SegmentOrder};
use nalgebra::Matrix3;

fn true_board() -> BoardGeometry {
    BoardGeometry::new(
        Point2::new(400.0, 300.0),
        200.0,
        90.0,
        SegmentOrder::STANDARD,
        RegionThresholds::default(),
    )
    .expect("geometry")
}

fn clicks(board: &BoardGeometry, layout: &ReferenceLayout, warp: &Homography) -> Vec<LabeledPoint> {
    layout
        .labels
        .iter()
        .map(|label| {
            let angle = label
                .angle_in(board.segment_order())
                .expect("layout label is a boundary");
            let p = warp.apply(board.point_at(angle, 1.0));
            LabeledPoint { label: *label, point: p }
        })
        .collect()
}

/// Impact samples well away from every ring and wedge boundary.
fn samples(board: &BoardGeometry) -> Vec<Point2<f64>> {
    let mut out = Vec::new();
    for i in 0..20 {
        let angle = SegmentOrder::center_angle(i) + 3.0;
        for df in [0.04, 0.12, 0.35, 0.6, 0.75, 0.9, 1.1] {
            out.push(board.point_at(angle, df));
        }
    }
    out
}

fn skew() -> Homography {
    Homography::new(Matrix3::new(
        1.1, 0.15, 30.0, //
        0.05, 0.9, 20.0, //
        0.0004, 0.0002, 1.0,
    ))
}

#[test]
fn evenly_spread_points_recover_the_exact_board() {
    let board = true_board();
    let layout = ReferenceLayout {
        reference: BoundaryLabel::new(20, 1),
        labels: [
            BoundaryLabel::new(20, 1),
            BoundaryLabel::new(6, 10),
            BoundaryLabel::new(3, 19),
            BoundaryLabel::new(11, 14),
        ],
    };
    let builder = CalibrationBuilder::default().with_layout(layout);
    let pts = clicks(&board, &layout, &Homography::identity());

    let g = builder.from_four_points(&pts).expect("calibration");
    assert_abs_diff_eq!(g.center().x, 400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(g.center().y, 300.0, epsilon = 1e-9);
    assert_abs_diff_eq!(g.radius(), 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(g.rotation_offset(), 90.0, epsilon = 1e-9);

    for p in samples(&board) {
        let want = classify(p, &board);
        let got = classify(p, &g);
        assert_eq!((got.segment_value, got.multiplier), (want.segment_value, want.multiplier));
    }
}

#[test]
fn reference_point_lands_on_its_boundary() {
    let board = true_board();
    let layout = ReferenceLayout::default();
    let pts = clicks(&board, &layout, &Homography::identity());
    let g = CalibrationBuilder::default()
        .from_four_points(&pts)
        .expect("calibration");

    let reference = pts[0].point;
    let r = classify(reference, &g);
    assert_abs_diff_eq!(r.angle_deg, 9.0, epsilon = 1e-9);
}

#[test]
fn rectified_default_layout_matches_the_true_board() {
    let board = true_board();
    let layout = ReferenceLayout::default();
    let pts = clicks(&board, &layout, &Homography::identity());
    let calibration = CalibrationBuilder::default()
        .from_four_points_rectified(&pts)
        .expect("calibration");
    assert!(calibration.perspective.is_some());

    for p in samples(&board) {
        let want = classify(p, &board);
        let got = calibration.classify(p);
        assert_eq!(
            (got.segment_value, got.multiplier, got.in_bounds),
            (want.segment_value, want.multiplier, want.in_bounds),
            "impact {p:?}"
        );
    }
}

#[test]
fn rectified_skewed_board_scores_like_the_flat_board() {
    let board = true_board();
    let layout = ReferenceLayout::default();
    let warp = skew();
    let pts = clicks(&board, &layout, &warp);
    let calibration = CalibrationBuilder::default()
        .from_four_points_rectified(&pts)
        .expect("calibration");

    for p in samples(&board) {
        let want = classify(p, &board);
        let got = calibration.classify(warp.apply(p));
        assert_eq!(
            (got.segment_value, got.multiplier, got.in_bounds),
            (want.segment_value, want.multiplier, want.in_bounds),
            "impact {p:?}"
        );
    }
}

#[test]
fn clicked_points_rectify_onto_the_outer_edge() {
    let board = true_board();
    let layout = ReferenceLayout::default();
    let pts = clicks(&board, &layout, &skew());
    let calibration = CalibrationBuilder::default()
        .from_four_points_rectified(&pts)
        .expect("calibration");

    for p in &pts {
        let q = calibration.rectify(p.point);
        let d = (q - calibration.geometry.center()).norm() / calibration.geometry.radius();
        assert_abs_diff_eq!(d, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn point_order_does_not_matter() {
    let board = true_board();
    let layout = ReferenceLayout::default();
    let mut pts = clicks(&board, &layout, &Homography::identity());
    let builder = CalibrationBuilder::default();
    let a = builder.from_four_points(&pts).expect("calibration");
    pts.reverse();
    let b = builder.from_four_points(&pts).expect("calibration");
    assert_abs_diff_eq!(a.rotation_offset(), b.rotation_offset(), epsilon = 1e-9);
    assert_abs_diff_eq!(a.radius(), b.radius(), epsilon = 1e-9);
}

#[test]
fn rectified_path_reports_the_same_errors() {
    let builder = CalibrationBuilder::default();
    assert_eq!(
        builder.from_four_points_rectified(&[]),
        Err(CalibrationError::InvalidPointCount { got: 0 })
    );
    let collinear = ReferenceLayout::default().label_points([
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(2.0, 0.0),
        Point2::new(3.0, 0.0),
    ]);
    assert_eq!(
        builder.from_four_points_rectified(&collinear),
        Err(CalibrationError::DegenerateCalibration)
    );
}
