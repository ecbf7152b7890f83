use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_locate::detector::connected_components::label_components;
use qr_locate::models::{GrayGrid, Grid};
use qr_locate::utils::edges::edge_strength;
use qr_locate::utils::grayscale::{rgb_to_luminance, rgb_to_luminance_parallel};
use qr_locate::utils::morphology::close;
use qr_locate::utils::smoothing::box_average_repeated;

fn noise(width: usize, height: usize) -> GrayGrid {
    let data = (0..width * height)
        .map(|i| ((i * 2654435761usize) >> 13) as u8)
        .collect();
    Grid::from_vec(width, height, data).unwrap()
}

fn blobs(width: usize, height: usize) -> GrayGrid {
    noise(width, height).map(|v| if v > 200 { 255 } else { 0 })
}

fn bench_luminance(c: &mut Criterion) {
    let (r, g, b) = (noise(640, 480), noise(640, 480), noise(640, 480));
    c.bench_function("rgb_to_luminance_640x480", |bench| {
        bench.iter(|| rgb_to_luminance(black_box(&r), black_box(&g), black_box(&b)))
    });
    c.bench_function("rgb_to_luminance_parallel_640x480", |bench| {
        bench.iter(|| rgb_to_luminance_parallel(black_box(&r), black_box(&g), black_box(&b)))
    });
}

fn bench_edges_and_smoothing(c: &mut Criterion) {
    let gray = noise(640, 480);
    c.bench_function("edge_strength_640x480", |b| {
        b.iter(|| edge_strength(black_box(&gray), false))
    });
    let edges = edge_strength(&gray, false);
    c.bench_function("box_average_x6_640x480", |b| {
        b.iter(|| box_average_repeated(black_box(&edges), 6, false))
    });
    c.bench_function("box_average_x6_640x480_parallel", |b| {
        b.iter(|| box_average_repeated(black_box(&edges), 6, true))
    });
}

fn bench_morphology_and_labeling(c: &mut Criterion) {
    let mask = blobs(640, 480);
    c.bench_function("close_4x4_640x480", |b| {
        b.iter(|| close(black_box(&mask), 4, 4, false))
    });
    c.bench_function("label_components_640x480", |b| {
        b.iter(|| label_components(black_box(&mask)))
    });
}

criterion_group!(
    benches,
    bench_luminance,
    bench_edges_and_smoothing,
    bench_morphology_and_labeling
);
criterion_main!(benches);
