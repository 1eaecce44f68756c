/// Headless demo host
/// Renders a textured cube over a floor plane and a coverage mask, then writes PNGs
use anyhow::{Context, Result};
use glam::{Mat4, Vec2, Vec3, Vec4};
use halfspace_raster::*;
use mimalloc::MiMalloc;
use std::path::{Path, PathBuf};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const WIDTH: usize = 800;
const HEIGHT: usize = 600;
const CLEAR_COLOR: u32 = 0xFF20_1810;

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);

    let stats = render_scene(&mut framebuffer)?;
    println!(
        "scene: {} fan triangles ({} culled, {} clipped away), {} pixels written",
        stats.triangles, stats.culled, stats.clipped_away, stats.pixels_written
    );
    save_png(&framebuffer, &out_dir.join("scene.png"))?;

    let outcome = render_coverage(&mut framebuffer)?;
    println!("coverage: {:?}", outcome);
    save_png(&framebuffer, &out_dir.join("coverage.png"))?;

    #[cfg(feature = "profiling")]
    FUNCTION_COUNTERS.snapshot().print_report();

    Ok(())
}

/// Depth-tested pass: a spinning cube on a floor that reaches behind the camera.
fn render_scene(framebuffer: &mut Framebuffer) -> Result<DrawStats> {
    halfspace_raster::perf_scope!("render_scene");
    framebuffer.clear(CLEAR_COLOR);

    let aspect = WIDTH as f32 / HEIGHT as f32;
    // Reversed depth: nearer surfaces get larger z, which is what the >= test keeps.
    let projection = Mat4::perspective_infinite_reverse_rh(60f32.to_radians(), aspect, 0.1);
    let view = Mat4::look_at_rh(Vec3::new(3.0, 2.5, 4.0), Vec3::ZERO, Vec3::Y);
    let view_projection = projection * view;

    let pipeline = Pipeline::new(PipelineConfig::default());
    let mut stats = pipeline.draw_mesh(&view_projection, &floor(), framebuffer)?;

    let model = Mat4::from_rotation_y(0.6) * Mat4::from_rotation_x(0.3);
    stats += pipeline.draw_mesh(&(view_projection * model), &cube(), framebuffer)?;

    log::info!("scene drawn: {:?}", stats);
    Ok(stats)
}

/// Coverage pass over a screen-space triangle spanning the whole target.
fn render_coverage(framebuffer: &mut Framebuffer) -> Result<TriangleOutcome> {
    halfspace_raster::perf_scope!("render_coverage");
    framebuffer.clear(0xFF00_0000);

    let triangle = [
        screen_vertex(0.1, 390.5),
        screen_vertex(0.0, 0.21),
        screen_vertex(799.5, 599.81),
    ];
    let rasterizer = Rasterizer::new(RasterMode::COVERAGE);
    Ok(rasterizer.rasterize(&triangle, &mut framebuffer.as_color_target())?)
}

fn screen_vertex(x: f32, y: f32) -> Vertex {
    Vertex::new(Vec4::new(x, y, 0.0, 1.0), Vec2::ZERO)
}

/// Split a counter-clockwise quad into two triangles with the full texture on it.
fn quad(corners: [Vec3; 4], uv_scale: f32) -> [[Vertex; 3]; 2] {
    let uv = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    let v = |i: usize| Vertex::from_position3(corners[i], uv[i] * uv_scale);
    [[v(0), v(1), v(2)], [v(0), v(2), v(3)]]
}

/// Texcoords above 1 wrap in fixed point, so the floor tiles.
fn floor() -> Vec<[Vertex; 3]> {
    let y = -1.5;
    quad(
        [
            Vec3::new(-20.0, y, 20.0),
            Vec3::new(20.0, y, 20.0),
            Vec3::new(20.0, y, -20.0),
            Vec3::new(-20.0, y, -20.0),
        ],
        8.0,
    )
    .to_vec()
}

fn cube() -> Vec<[Vertex; 3]> {
    let p = Vec3::new;
    let faces = [
        [p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0)],
        [p(1.0, -1.0, -1.0), p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0)],
        [p(1.0, -1.0, 1.0), p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0)],
        [p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0)],
        [p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0), p(-1.0, 1.0, -1.0)],
        [p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(-1.0, -1.0, 1.0)],
    ];
    faces.into_iter().flat_map(|face| quad(face, 1.0)).collect()
}

/// Row 0 of the framebuffer is NDC y = -1, so flip to get an upright image.
fn save_png(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    let image = image::RgbaImage::from_raw(
        framebuffer.width as u32,
        framebuffer.height as u32,
        framebuffer.to_rgba8(),
    )
    .context("framebuffer does not match its dimensions")?;

    image::imageops::flip_vertical(&image)
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
