/// Errors surfaced by the rasterizer and pipeline.
///
/// Culled or fully clipped triangles are not errors; they are reported through
/// `TriangleOutcome` and `DrawStats`.
use crate::rendering::Precision;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("color buffer holds {actual} pixels but a {width}x{height} target needs {expected}")]
    ColorBufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("depth buffer holds {actual} cells but a {width}x{height} target needs {expected}")]
    DepthBufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("depth testing is enabled but the target has no depth buffer")]
    MissingDepthBuffer,

    #[error("{width}x{height} target does not fit the {limit}-pixel coordinate range of {precision:?}")]
    TargetTooLarge {
        width: usize,
        height: usize,
        limit: usize,
        precision: Precision,
    },

    #[error("triangle covers x {min_x}..{max_x}, y {min_y}..{max_y}, outside the {width}x{height} target")]
    OutOfBounds {
        min_x: i64,
        max_x: i64,
        min_y: i64,
        max_y: i64,
        width: usize,
        height: usize,
    },
}
