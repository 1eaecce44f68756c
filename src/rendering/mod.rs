/// Fixed-point scan conversion into caller-owned color/depth buffers
pub mod fixed_point;
pub mod framebuffer;
pub mod rasterizer;

pub use fixed_point::Wrap;
pub use framebuffer::{unpack_rgba, Framebuffer, RenderTarget, DEPTH_CLEAR, DEPTH_MAX};
pub use rasterizer::{
    rasterize, BoundsPolicy, PixelOutput, PixelTarget, Precision, RasterMode, Rasterizer,
    TriangleOutcome, COVERAGE_COLOR,
};
