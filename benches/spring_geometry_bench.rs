use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use spring_rs::core::{
    Axis, DefaultUnit, PathId, PointMm, SpringSpec, UnitValue, ViewportContext, ViewportVersion,
    generate_spring_path,
};
use spring_rs::render::StrokeStyle;
use spring_rs::scene::SpringNode;

fn bench_generate_100_revolutions(c: &mut Criterion) {
    let spec = SpringSpec::new(
        PointMm::new(0.0, 0.0),
        PointMm::new(150.0, 0.0),
        2.0,
        0.75,
        50,
    )
    .expect("valid spec");

    c.bench_function("generate_100_revolutions", |b| {
        b.iter(|| generate_spring_path(black_box(&spec), black_box(PathId::new(0))))
    });
}

fn bench_unit_resolution_mixed_sum(c: &mut Criterion) {
    let viewport = ViewportContext::new(
        (0.0, 0.0),
        (1920.0, 1080.0),
        (0.2, 0.2),
        ViewportVersion::new(0),
    )
    .expect("valid viewport");
    let value = UnitValue::fraction(0.4) + UnitValue::cm(1.25) + UnitValue::points(12.0);

    c.bench_function("unit_resolution_mixed_sum", |b| {
        b.iter(|| {
            value
                .resolve(black_box(&viewport), black_box(Axis::X))
                .expect("resolve")
        })
    });
}

fn bench_node_redraw_cached(c: &mut Criterion) {
    let mut node = SpringNode::builder(DefaultUnit::Fraction)
        .spring(
            (0.1, 0.5),
            (0.9, 0.5),
            UnitValue::mm(4.0),
            0.75,
            StrokeStyle::default(),
        )
        .build()
        .expect("valid node");
    let viewport =
        ViewportContext::with_uniform_scale((1920.0, 1080.0), 0.2, ViewportVersion::new(0))
            .expect("valid viewport");
    node.draw(&viewport).expect("prime cache");

    c.bench_function("node_redraw_cached", |b| {
        b.iter(|| {
            let paths = node.draw(black_box(&viewport)).expect("cached draw");
            black_box(paths.len())
        })
    });
}

criterion_group!(
    benches,
    bench_generate_100_revolutions,
    bench_unit_resolution_mixed_sum,
    bench_node_redraw_cached
);
criterion_main!(benches);
