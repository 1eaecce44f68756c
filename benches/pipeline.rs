/// Benchmark suite for the clip-to-pixels pipeline
/// Clipping on its own, then full draws with and without near-plane crossings.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Mat4, Vec2, Vec3, Vec4};
use halfspace_raster::geometry::clip_triangle;
use halfspace_raster::{Framebuffer, Pipeline, Vertex};

const WIDTH: usize = 800;
const HEIGHT: usize = 600;

fn clip(x: f32, y: f32, z: f32, w: f32) -> Vertex {
    Vertex::new(Vec4::new(x, y, z, w), Vec2::ZERO)
}

fn bench_clip(c: &mut Criterion) {
    let inside = [
        clip(-0.5, -0.5, 0.5, 1.0),
        clip(0.5, -0.5, 0.5, 1.0),
        clip(-0.5, 0.5, 0.5, 1.0),
    ];
    let crossing_all = [
        clip(-3.0, -3.0, -2.0, 1.0),
        clip(3.0, -1.0, 2.0, 1.0),
        clip(0.0, 3.0, 0.5, 1.0),
    ];

    c.bench_function("clip_inside", |b| {
        b.iter(|| black_box(clip_triangle(black_box(&inside))))
    });
    c.bench_function("clip_crossing_all_planes", |b| {
        b.iter(|| black_box(clip_triangle(black_box(&crossing_all))))
    });
}

fn bench_draw_floor(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let projection =
        Mat4::perspective_infinite_reverse_rh(60f32.to_radians(), WIDTH as f32 / HEIGHT as f32, 0.1);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.5, -5.0), Vec3::Y);
    let view_projection = projection * view;

    // A floor that passes under and behind the camera.
    let corner = |x: f32, z: f32, u: f32, v: f32| {
        Vertex::from_position3(Vec3::new(x, -1.0, z), Vec2::new(u, v))
    };
    let floor = [
        [corner(-20.0, 20.0, 0.0, 0.0), corner(20.0, 20.0, 8.0, 0.0), corner(20.0, -20.0, 8.0, 8.0)],
        [corner(-20.0, 20.0, 0.0, 0.0), corner(20.0, -20.0, 8.0, 8.0), corner(-20.0, -20.0, 0.0, 8.0)],
    ];

    c.bench_function("draw_floor_near_clipped", |b| {
        let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);
        b.iter(|| {
            framebuffer.clear(0);
            black_box(pipeline.draw_mesh(black_box(&view_projection), &floor, &mut framebuffer))
        });
    });
}

criterion_group!(benches, bench_clip, bench_draw_floor);
criterion_main!(benches);
