/// Clip-space triangle to pixels: clip, fan out, project, rasterize.
///
/// Holds no per-frame state. Screen size comes from the target on every draw,
/// so one pipeline can serve targets of different sizes.
use crate::error::RasterError;
use crate::geometry::{clip_triangle, project_to_screen, Triangle, Vertex};
#[cfg(feature = "profiling")]
use crate::perf::FUNCTION_COUNTERS;
use crate::rendering::{BoundsPolicy, PixelTarget, RasterMode, Rasterizer, TriangleOutcome};
use crate::count_call;
use glam::Mat4;
use std::ops::AddAssign;

/// Configuration for the draw pipeline
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub mode: RasterMode,
    pub bounds: BoundsPolicy,
}

/// Per-draw totals. Adds up across draws.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Input triangles that left fewer than 3 vertices after clipping.
    pub clipped_away: u32,
    /// Fan triangles handed to the rasterizer.
    pub triangles: u32,
    /// Fan triangles rejected as back-facing or degenerate.
    pub culled: u32,
    pub pixels_inside: u32,
    pub pixels_written: u32,
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, other: Self) {
        self.clipped_away += other.clipped_away;
        self.triangles += other.triangles;
        self.culled += other.culled;
        self.pixels_inside += other.pixels_inside;
        self.pixels_written += other.pixels_written;
    }
}

pub struct Pipeline {
    rasterizer: Rasterizer,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            rasterizer: Rasterizer::new(config.mode).with_bounds(config.bounds),
        }
    }

    /// Draw one triangle given in clip space.
    pub fn draw_triangle<T: PixelTarget>(
        &self,
        triangle: &[Vertex; 3],
        target: &mut T,
    ) -> Result<DrawStats, RasterError> {
        count_call!(FUNCTION_COUNTERS.triangles_submitted);
        let mut stats = DrawStats::default();

        let polygon = clip_triangle(triangle);
        if polygon.len() < 3 {
            count_call!(FUNCTION_COUNTERS.triangles_clipped_away);
            log::trace!("triangle clipped away ({} vertices left)", polygon.len());
            stats.clipped_away = 1;
            return Ok(stats);
        }

        let width = target.width() as f32;
        let height = target.height() as f32;

        for fan in polygon.triangles() {
            count_call!(FUNCTION_COUNTERS.clip_fan_triangles);
            let screen = fan.map(|v| project_to_screen(&v, width, height));
            stats.triangles += 1;

            match self.rasterizer.rasterize(&screen, target)? {
                TriangleOutcome::Culled => {
                    log::trace!(
                        "culled fan triangle ({:.1}, {:.1}) ({:.1}, {:.1}) ({:.1}, {:.1})",
                        screen[0].position.x,
                        screen[0].position.y,
                        screen[1].position.x,
                        screen[1].position.y,
                        screen[2].position.x,
                        screen[2].position.y
                    );
                    stats.culled += 1;
                }
                TriangleOutcome::Rasterized { inside, written } => {
                    stats.pixels_inside += inside;
                    stats.pixels_written += written;
                }
            }
        }

        Ok(stats)
    }

    /// Transform object-space vertices by `transform` (model-view-projection),
    /// then draw.
    pub fn draw_transformed<T: PixelTarget>(
        &self,
        transform: &Mat4,
        triangle: &[Vertex; 3],
        target: &mut T,
    ) -> Result<DrawStats, RasterError> {
        let clip = triangle.map(|v| v.transformed(transform));
        self.draw_triangle(&clip, target)
    }

    /// Draw a list of triangles, summing their stats. Stops at the first error.
    pub fn draw_mesh<T: PixelTarget>(
        &self,
        transform: &Mat4,
        triangles: &[Triangle],
        target: &mut T,
    ) -> Result<DrawStats, RasterError> {
        let mut total = DrawStats::default();
        for triangle in triangles {
            total += self.draw_transformed(transform, triangle, target)?;
        }
        Ok(total)
    }
}
