/// Color and depth storage for the rasterizer.
///
/// The rasterizer never owns pixel memory. It writes through `RenderTarget`, a
/// borrowed view over caller-owned slices that lives only as long as the call.
/// `Framebuffer` is the owned storage a host (or a test) keeps across frames.
use crate::count_call;
use crate::error::RasterError;
#[cfg(feature = "profiling")]
use crate::perf::FUNCTION_COUNTERS;

/// Largest meaningful depth value; the depth buffer keeps 12 of its 16 bits.
pub const DEPTH_MAX: u16 = 0x0fff;

/// Depth value a cleared buffer holds. Larger depths win, so zero is "far".
pub const DEPTH_CLEAR: u16 = 0;

/// Borrowed view over a `width * height` color buffer and optional depth buffer,
/// both row-major and addressed by `y * width + x`.
pub struct RenderTarget<'a> {
    width: usize,
    height: usize,
    color: &'a mut [u32],
    depth: Option<&'a mut [u16]>,
}

impl<'a> RenderTarget<'a> {
    /// Wrap caller-owned buffers, checking that both hold exactly `width * height` cells.
    pub fn new(
        width: usize,
        height: usize,
        color: &'a mut [u32],
        depth: Option<&'a mut [u16]>,
    ) -> Result<Self, RasterError> {
        let expected = width * height;
        if color.len() != expected {
            return Err(RasterError::ColorBufferSize {
                width,
                height,
                expected,
                actual: color.len(),
            });
        }
        if let Some(depth) = depth.as_deref() {
            if depth.len() != expected {
                return Err(RasterError::DepthBufferSize {
                    width,
                    height,
                    expected,
                    actual: depth.len(),
                });
            }
        }

        Ok(Self {
            width,
            height,
            color,
            depth,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    /// Depth test at (x, y): passes when `depth` is greater than or equal to the
    /// stored value, in which case the stored value is replaced and the linear
    /// index is returned. A target without depth buffer always passes.
    #[inline]
    pub fn test_depth_and_get_index(&mut self, x: usize, y: usize, depth: u16) -> Option<usize> {
        let index = y * self.width + x;
        match self.depth.as_deref_mut() {
            Some(buffer) => {
                if depth >= buffer[index] {
                    buffer[index] = depth & DEPTH_MAX;
                    Some(index)
                } else {
                    None
                }
            }
            None => Some(index),
        }
    }

    #[inline]
    pub fn write_color(&mut self, index: usize, color: u32) {
        self.color[index] = color;
    }
}

/// Owned color + depth storage.
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pub color_buffer: Vec<u32>, // 0xAABBGGRR
    pub depth_buffer: Vec<u16>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_count = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; pixel_count],
            depth_buffer: vec![DEPTH_CLEAR; pixel_count],
        }
    }

    /// Clear color to `clear_color` and depth to the far sentinel. Call once per frame.
    pub fn clear(&mut self, clear_color: u32) {
        count_call!(FUNCTION_COUNTERS.framebuffer_clear_calls);
        self.color_buffer.fill(clear_color);
        self.depth_buffer.fill(DEPTH_CLEAR);
    }

    /// Change dimensions. Old contents do not survive: both buffers come back
    /// cleared, addressed row-major at the new width.
    pub fn resize(&mut self, width: usize, height: usize) {
        log::debug!(
            "resizing framebuffer {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        let pixel_count = width * height;
        self.color_buffer.clear();
        self.color_buffer.resize(pixel_count, 0);
        self.depth_buffer.clear();
        self.depth_buffer.resize(pixel_count, DEPTH_CLEAR);
    }

    /// View with depth buffer attached.
    pub fn as_target(&mut self) -> RenderTarget<'_> {
        RenderTarget {
            width: self.width,
            height: self.height,
            color: &mut self.color_buffer,
            depth: Some(&mut self.depth_buffer),
        }
    }

    /// View over the color buffer only, for coverage rendering.
    pub fn as_color_target(&mut self) -> RenderTarget<'_> {
        RenderTarget {
            width: self.width,
            height: self.height,
            color: &mut self.color_buffer,
            depth: None,
        }
    }

    #[inline]
    pub fn color_at(&self, x: usize, y: usize) -> u32 {
        self.color_buffer[y * self.width + x]
    }

    #[inline]
    pub fn depth_at(&self, x: usize, y: usize) -> u16 {
        self.depth_buffer[y * self.width + x]
    }

    /// Color buffer as RGBA bytes, ready for an image encoder.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|&c| unpack_rgba(c))
            .collect()
    }
}

/// Split a 0xAABBGGRR color into `[r, g, b, a]`.
#[inline]
pub const fn unpack_rgba(color: u32) -> [u8; 4] {
    [
        color as u8,
        (color >> 8) as u8,
        (color >> 16) as u8,
        (color >> 24) as u8,
    ]
}
