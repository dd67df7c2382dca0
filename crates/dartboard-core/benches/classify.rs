use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dartboard_core::{classify, BoardGeometry, Point2};

fn bench_classify(c: &mut Criterion) {
    let geometry = BoardGeometry::standard(Point2::new(640.0, 360.0), 300.0)
        .and_then(|g| g.with_rotation(90.0))
        .expect("geometry");

    let points: Vec<Point2<f64>> = (0..1024)
        .map(|i| {
            let t = i as f64 * 0.37;
            let r = 320.0 * ((i % 97) as f64 / 97.0);
            Point2::new(640.0 + r * t.cos(), 360.0 + r * t.sin())
        })
        .collect();

    c.bench_function("classify_1024", |b| {
        b.iter(|| {
            let mut total = 0i32;
            for p in &points {
                total += classify(black_box(*p), &geometry).score;
            }
            black_box(total)
        })
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
