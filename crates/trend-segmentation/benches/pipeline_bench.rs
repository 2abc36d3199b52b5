use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trend_core::test_data::TestTracks;
use trend_segmentation::{ExtremumDetector, TrendParameters, TrendSegmenter};
use trend_smoothing::WindowType;

fn bench_extrema(c: &mut Criterion) {
    let mut group = c.benchmark_group("ExtremumDetector");
    let detector = ExtremumDetector::default();

    for size in [1_000, 10_000] {
        let track = TestTracks::noisy_hills(size, 300.0, 40.0, 8.0, 2.0, 11);
        group.bench_with_input(BenchmarkId::new("detect", size), &track, |b, track| {
            b.iter(|| detector.detect(black_box(track)))
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("TrendSegmenter");

    for size in [500, 2_000, 10_000] {
        let track = TestTracks::with_accuracy_dropouts(size, 0.1, 80.0, 5);
        let adaptive = TrendSegmenter::default();
        group.bench_with_input(BenchmarkId::new("adaptive", size), &track, |b, track| {
            b.iter(|| adaptive.segment(black_box(track)).unwrap())
        });

        let fixed = TrendSegmenter::new(TrendParameters {
            window_size: Some(9),
            window_type: WindowType::Hanning,
            ..Default::default()
        })
        .unwrap();
        group.bench_with_input(BenchmarkId::new("fixed_window", size), &track, |b, track| {
            b.iter(|| fixed.segment(black_box(track)).unwrap())
        });
    }
    group.finish();
}

fn bench_random_walk(c: &mut Criterion) {
    let track = TestTracks::random_walk(5_000, 99);
    let segmenter = TrendSegmenter::default();
    c.bench_function("random_walk_5k", |b| {
        b.iter(|| segmenter.segment(black_box(&track)).unwrap())
    });
}

criterion_group!(benches, bench_extrema, bench_pipeline, bench_random_walk);
criterion_main!(benches);
