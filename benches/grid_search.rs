//! Benchmark the grid detector stages.

use battlemap_vectorizer::edges::extract_edge_fields;
use battlemap_vectorizer::grid::{autocorrelation, brute_force_search};
use battlemap_vectorizer::image::RasterImage;
use battlemap_vectorizer::{GridDetector, GridParams, WallVectorizer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Dark lines every `period` px on a light background.
fn line_grid(size: usize, period: usize) -> RasterImage {
    let mut img = RasterImage::filled(size, size, [235, 230, 215]);
    for p in (7..size).step_by(period) {
        img.fill_rect(0, p, size, p + 1, [30, 30, 30]);
        img.fill_rect(p, 0, p + 1, size, [30, 30, 30]);
    }
    img
}

fn bench_edges_and_acf(c: &mut Criterion) {
    let img = line_grid(1024, 50);
    c.bench_function("extract_edge_fields_1024", |b| {
        b.iter(|| extract_edge_fields(black_box(&img)))
    });

    let fields = extract_edge_fields(&img);
    let rows = fields.row_profile();
    c.bench_function("autocorrelation_1022", |b| {
        b.iter(|| autocorrelation(black_box(&rows)))
    });
}

fn bench_brute_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("brute_force_search");
    group.sample_size(10);
    for &max_size in &[60usize, 120, 200] {
        let fields = extract_edge_fields(&line_grid(1024, 50));
        group.bench_with_input(BenchmarkId::from_parameter(max_size), &max_size, |b, &m| {
            b.iter(|| brute_force_search(black_box(&fields), 20, m))
        });
    }
    group.finish();
}

fn bench_full_pipelines(c: &mut Criterion) {
    let img = line_grid(1024, 50);
    let detector = GridDetector::new(GridParams::default()).unwrap();
    c.bench_function("grid_detect_1024", |b| b.iter(|| detector.detect(black_box(&img))));

    let mut traced = RasterImage::filled(1024, 1024, [235, 230, 215]);
    for k in 0..8 {
        let p = 100 + k * 110;
        traced.fill_rect(80, p, 940, p + 4, [210, 30, 25]);
        traced.fill_rect(p, 80, p + 4, 940, [210, 30, 25]);
    }
    let vectorizer = WallVectorizer::default();
    c.bench_function("walls_vectorize_1024", |b| {
        b.iter(|| vectorizer.vectorize(black_box(&traced)))
    });
}

criterion_group!(benches, bench_edges_and_acf, bench_brute_force, bench_full_pipelines);
criterion_main!(benches);
