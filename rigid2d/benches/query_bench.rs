use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};
use rigid2d::geometry::geo_traits::{Intersects, Shape, Transformable};
use rigid2d::geometry::{AnyShape, Circle, Complex, Ray, RegularPolygon, RoundedRectangle, Square, Triangle, Vector2};

criterion_main!(benches);
criterion_group!(benches, contains_bench, closest_point_bench, ray_bench, polygon_side_count_bench, transform_bench);

const N_QUERIES: usize = 1000;

fn create_shapes() -> Vec<AnyShape> {
    vec![
        Triangle::from_points(Vector2::new(-1.0, -1.0), Vector2::new(2.0, -0.5), Vector2::new(0.0, 2.0)).into(),
        Square::try_new(Vector2::ZERO, Complex::from_degrees(30.0), 2.0)
            .unwrap()
            .into(),
        RoundedRectangle::try_new(Vector2::ZERO, Complex::from_degrees(-15.0), 3.0, 2.0, 0.5)
            .unwrap()
            .into(),
        RegularPolygon::try_new(Vector2::ZERO, Complex::from_degrees(10.0), 1.0, 12)
            .unwrap()
            .into(),
        Circle::try_new(Vector2::ZERO, 1.5).unwrap().into(),
    ]
}

fn sample_points(n: usize, rng: &mut impl Rng) -> Vec<Vector2> {
    (0..n)
        .map(|_| Vector2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0)))
        .collect()
}

fn sample_rays(n: usize, rng: &mut impl Rng) -> Vec<Ray> {
    sample_points(n, rng)
        .into_iter()
        .map(|origin| {
            let direction = Complex::from_angle(rng.random_range(-3.14..3.14)).direction();
            Ray::new(origin, direction)
        })
        .collect()
}

fn contains_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0);
    let points = sample_points(N_QUERIES, &mut rng);
    let mut group = c.benchmark_group("contains");
    for shape in create_shapes() {
        group.bench_with_input(BenchmarkId::from_parameter(shape.kind()), &shape, |b, shape| {
            b.iter(|| points.iter().filter(|p| shape.contains(**p)).count())
        });
    }
    group.finish();
}

fn closest_point_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let points = sample_points(N_QUERIES, &mut rng);
    let mut group = c.benchmark_group("closest_point");
    for shape in create_shapes() {
        group.bench_with_input(BenchmarkId::from_parameter(shape.kind()), &shape, |b, shape| {
            b.iter(|| {
                for p in &points {
                    black_box(shape.closest_point_to(*p));
                }
            })
        });
    }
    group.finish();
}

fn ray_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(2);
    let rays = sample_rays(N_QUERIES, &mut rng);
    let mut group = c.benchmark_group("ray_intersects");
    for shape in create_shapes() {
        group.bench_with_input(BenchmarkId::from_parameter(shape.kind()), &shape, |b, shape| {
            b.iter(|| rays.iter().filter(|r| shape.intersects(*r)).count())
        });
    }
    group.finish();
}

/// Ray queries on polygons should not grow with the number of sides
fn polygon_side_count_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(3);
    let rays = sample_rays(N_QUERIES, &mut rng);
    let mut group = c.benchmark_group("polygon_ray_intersects");
    for side_count in [3, 8, 64, 512] {
        let polygon = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 6.0 / side_count as f32, side_count)
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(side_count), &polygon, |b, polygon| {
            b.iter(|| rays.iter().filter(|r| polygon.intersects(*r)).count())
        });
    }
    group.finish();
}

fn transform_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut shapes = create_shapes();
    c.bench_function("rotate_around_point", |b| {
        b.iter(|| {
            let pivot = Vector2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
            let rotation = Complex::from_angle(rng.random_range(-0.1..0.1));
            for shape in shapes.iter_mut() {
                shape.rotate_around_point_by(pivot, rotation);
            }
        })
    });
    for shape in shapes.iter_mut() {
        shape.calibrate();
    }
    black_box(shapes);
}
