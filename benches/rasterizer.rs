/// Benchmark suite for the half-space rasterizer
/// Scan conversion cost by triangle size, mode and fixed-point format.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec4};
use halfspace_raster::rendering::{
    rasterize, Framebuffer, PixelOutput, Precision, RasterMode, Rasterizer,
};
use halfspace_raster::Vertex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WIDTH: usize = 800;
const HEIGHT: usize = 600;

fn screen(x: f32, y: f32, z: f32, u: f32, v: f32) -> Vertex {
    Vertex::new(Vec4::new(x, y, z, 1.0), Vec2::new(u, v))
}

fn right_triangle(size: f32) -> [Vertex; 3] {
    [
        screen(10.0, 10.0, 0.5, 0.0, 0.0),
        screen(10.0 + size, 10.0, 0.6, 1.0, 0.0),
        screen(10.0, 10.0 + size, 0.7, 0.0, 1.0),
    ]
}

fn bench_triangle_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize_by_size");
    let rasterizer = Rasterizer::new(RasterMode::DEPTH_TESTED);

    for size in [8.0f32, 64.0, 256.0, 512.0] {
        let tri = right_triangle(size);
        group.bench_with_input(BenchmarkId::new("depth_tested", size as u32), &tri, |b, tri| {
            let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
            b.iter(|| {
                framebuffer.clear(0);
                black_box(rasterizer.rasterize(black_box(tri), &mut framebuffer))
            });
        });
    }

    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize_mode");
    let tri = right_triangle(256.0);
    let modes = [
        ("depth_tested_12_0", RasterMode::DEPTH_TESTED),
        ("coverage_11_5", RasterMode::COVERAGE),
        (
            "coverage_12_0",
            RasterMode {
                precision: Precision::Integer12,
                depth_test: false,
                output: PixelOutput::Coverage,
            },
        ),
    ];

    for (name, mode) in modes {
        let rasterizer = Rasterizer::new(mode);
        group.bench_function(name, |b| {
            let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
            b.iter(|| {
                framebuffer.clear(0);
                black_box(rasterizer.rasterize(black_box(&tri), &mut framebuffer))
            });
        });
    }

    group.finish();
}

fn bench_free_function_full_screen(c: &mut Criterion) {
    let tri = [
        screen(0.1, 390.5, 0.0, 0.0, 0.0),
        screen(0.0, 0.21, 0.0, 0.0, 0.0),
        screen(799.5, 599.81, 0.0, 0.0, 0.0),
    ];
    let mut color = vec![0u32; WIDTH * HEIGHT];

    c.bench_function("rasterize_coverage_full_screen", |b| {
        b.iter(|| black_box(rasterize(black_box(&tri), WIDTH, HEIGHT, None, &mut color)));
    });
}

fn bench_many_small_triangles(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let triangles: Vec<[Vertex; 3]> = (0..1000)
        .map(|_| {
            let x = rng.gen_range(0.0..(WIDTH - 20) as f32);
            let y = rng.gen_range(0.0..(HEIGHT - 20) as f32);
            let z = rng.gen_range(0.0..1.0);
            [
                screen(x, y, z, 0.0, 0.0),
                screen(x + 16.0, y, z, 1.0, 0.0),
                screen(x, y + 16.0, z, 0.0, 1.0),
            ]
        })
        .collect();
    let rasterizer = Rasterizer::default();

    c.bench_function("rasterize_1000_small", |b| {
        let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
        b.iter(|| {
            framebuffer.clear(0);
            for tri in &triangles {
                black_box(rasterizer.rasterize(tri, &mut framebuffer)).ok();
            }
        });
    });
}

criterion_group!(
    benches,
    bench_triangle_sizes,
    bench_modes,
    bench_free_function_full_screen,
    bench_many_small_triangles,
);
criterion_main!(benches);
