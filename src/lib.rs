pub mod error;
pub mod geometry;
pub mod perf;
pub mod pipeline;
/// Half-space rasterizer - CPU triangle pipeline with exact fixed-point edge functions
/// Clip space in, packed color and 12-bit depth out
pub mod rendering;

pub use error::RasterError;
pub use geometry::{clip_triangle, project_to_screen, ClippedPolygon, Triangle, Vertex};
pub use perf::{CounterSnapshot, FunctionCounters, FUNCTION_COUNTERS};
pub use pipeline::{DrawStats, Pipeline, PipelineConfig};
pub use rendering::{
    rasterize, BoundsPolicy, Framebuffer, PixelOutput, PixelTarget, Precision, RasterMode,
    Rasterizer, RenderTarget, TriangleOutcome,
};
