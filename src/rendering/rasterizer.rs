/// Fixed-point half-space triangle rasterizer.
///
/// Screen-space vertices are quantized to signed fixed point, turned into three
/// integer edge functions plus affine depth/texcoord planes, and the bounding box
/// is walked with pure incremental adds. Every accumulator wraps modulo its bit
/// width after every step; nothing is widened or saturated.
use super::fixed_point::{round_to_int, truncate_to_int, Wrap};
use super::framebuffer::{Framebuffer, RenderTarget, DEPTH_MAX};
use crate::error::RasterError;
use crate::geometry::Vertex;
#[cfg(feature = "profiling")]
use crate::perf::FUNCTION_COUNTERS;
use crate::{count_add, count_call};

/// Color written by `PixelOutput::Coverage`.
pub const COVERAGE_COLOR: u32 = 0xFFFF_FFFF;

const OPAQUE: u32 = 0xFF00_0000;

/// Depth is always 12-bit, whatever the coordinate precision.
const DEPTH_WRAP: Wrap = Wrap::new(12);

/// Fixed-point format of screen coordinates and texcoords.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Signed 12.0 coordinates, 24-bit edge functions, 12-bit texcoords.
    Integer12,
    /// Signed 11.5 coordinates, 32-bit edge functions, 16-bit texcoords.
    Subpixel11_5,
}

impl Precision {
    #[inline]
    pub const fn coordinate_bits(self) -> u32 {
        match self {
            Precision::Integer12 => 12,
            Precision::Subpixel11_5 => 16,
        }
    }

    #[inline]
    pub const fn fraction_bits(self) -> u32 {
        match self {
            Precision::Integer12 => 0,
            Precision::Subpixel11_5 => 5,
        }
    }

    #[inline]
    pub const fn texcoord_bits(self) -> u32 {
        match self {
            Precision::Integer12 => 12,
            Precision::Subpixel11_5 => 16,
        }
    }

    /// Edge functions are products of two coordinates.
    #[inline]
    pub const fn edge_bits(self) -> u32 {
        2 * self.coordinate_bits()
    }

    /// Pixel coordinates must stay below this to avoid wrapping to negative.
    #[inline]
    pub const fn pixel_limit(self) -> usize {
        1 << (self.coordinate_bits() - 1 - self.fraction_bits())
    }

    #[inline]
    const fn coordinate_wrap(self) -> Wrap {
        Wrap::new(self.coordinate_bits())
    }

    #[inline]
    const fn edge_wrap(self) -> Wrap {
        Wrap::new(self.edge_bits())
    }

    #[inline]
    const fn texcoord_wrap(self) -> Wrap {
        Wrap::new(self.texcoord_bits())
    }
}

/// What an inside, depth-passing pixel writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PixelOutput {
    /// Opaque alpha, top 8 bits of U in bits 8..16 and of V in bits 0..8.
    Texcoord,
    /// `COVERAGE_COLOR`.
    Coverage,
}

/// Rasterizer configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RasterMode {
    pub precision: Precision,
    /// Requires a depth buffer on the target.
    pub depth_test: bool,
    pub output: PixelOutput,
}

impl RasterMode {
    /// 12.0 coordinates, depth test, interpolated texcoords packed into the color.
    pub const DEPTH_TESTED: RasterMode = RasterMode {
        precision: Precision::Integer12,
        depth_test: true,
        output: PixelOutput::Texcoord,
    };

    /// 11.5 coordinates, no depth buffer, binary coverage mask.
    pub const COVERAGE: RasterMode = RasterMode {
        precision: Precision::Subpixel11_5,
        depth_test: false,
        output: PixelOutput::Coverage,
    };

    /// Whether depth and texcoords are interpolated at all. Without a depth
    /// test, coverage output reads neither.
    #[inline]
    pub const fn interpolates(&self) -> bool {
        self.depth_test || matches!(self.output, PixelOutput::Texcoord)
    }
}

impl Default for RasterMode {
    fn default() -> Self {
        Self::DEPTH_TESTED
    }
}

/// What to do when a triangle's scan box leaves the target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundsPolicy {
    /// Scan only the part of the box inside the target. Interpolants start from
    /// the clamped corner, so covered pixels get the same values as unclamped.
    #[default]
    Clamp,
    /// Fail with `RasterError::OutOfBounds` before touching any pixel.
    Reject,
}

/// Result of rasterizing one triangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangleOutcome {
    /// Back-facing or zero-area; nothing was touched.
    Culled,
    /// `inside` pixels passed the half-space test, `written` of them were stored.
    Rasterized { inside: u32, written: u32 },
}

impl TriangleOutcome {
    #[inline]
    pub fn pixels_written(&self) -> u32 {
        match *self {
            TriangleOutcome::Culled => 0,
            TriangleOutcome::Rasterized { written, .. } => written,
        }
    }
}

/// Abstraction over a render target that supports depth-tested pixel writes.
pub trait PixelTarget {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn has_depth(&self) -> bool;
    /// `depth >= stored` passes: store `depth` and return the pixel index.
    fn test_depth_and_get_index(&mut self, x: usize, y: usize, depth: u16) -> Option<usize>;
    fn write_color(&mut self, index: usize, color: u32);
}

impl<'a> PixelTarget for RenderTarget<'a> {
    #[inline]
    fn width(&self) -> usize {
        RenderTarget::width(self)
    }

    #[inline]
    fn height(&self) -> usize {
        RenderTarget::height(self)
    }

    #[inline]
    fn has_depth(&self) -> bool {
        RenderTarget::has_depth(self)
    }

    #[inline]
    fn test_depth_and_get_index(&mut self, x: usize, y: usize, depth: u16) -> Option<usize> {
        RenderTarget::test_depth_and_get_index(self, x, y, depth)
    }

    #[inline]
    fn write_color(&mut self, index: usize, color: u32) {
        RenderTarget::write_color(self, index, color);
    }
}

impl PixelTarget for Framebuffer {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn has_depth(&self) -> bool {
        true
    }

    #[inline]
    fn test_depth_and_get_index(&mut self, x: usize, y: usize, depth: u16) -> Option<usize> {
        let index = y * self.width + x;
        if depth >= self.depth_buffer[index] {
            self.depth_buffer[index] = depth & DEPTH_MAX;
            Some(index)
        } else {
            None
        }
    }

    #[inline]
    fn write_color(&mut self, index: usize, color: u32) {
        self.color_buffer[index] = color;
    }
}

/// One directed edge `a -> b` as `F(x, y) = c + dx * x + dy * y`.
#[derive(Copy, Clone, Debug)]
struct EdgeFunction {
    /// `xa * yb - xb * ya`, wrapped; sums to the doubled area.
    constant: i64,
    /// `constant` minus the fill-rule bias, wrapped.
    biased: i64,
    /// `ya - yb`, sign-extended.
    dx: i64,
    /// `xb - xa`, sign-extended.
    dy: i64,
}

impl EdgeFunction {
    fn new(a: (i64, i64), b: (i64, i64), coord: Wrap, edge: Wrap) -> Self {
        let (xa, ya) = a;
        let (xb, yb) = b;
        let dx = coord.sign_extend(ya - yb);
        let dy = coord.sign_extend(xb - xa);
        let constant = edge.wrap(xa * yb - xb * ya);

        // Top-left rule: a zero on a top edge (horizontal, heading +x) or a left
        // edge (heading -y) counts as inside, a zero on any other edge does not.
        let top_left = dx > 0 || (dx == 0 && dy > 0);
        let bias = if top_left { 0 } else { -1 };

        Self {
            constant,
            biased: edge.wrap(constant + bias),
            dx,
            dy,
        }
    }

    #[inline]
    fn at(&self, edge: Wrap, sx: i64, sy: i64) -> i64 {
        edge.wrap(self.biased + self.dx * sx + self.dy * sy)
    }
}

/// An attribute as an affine function of the sample position.
#[derive(Copy, Clone, Debug)]
struct AttributePlane {
    wrap: Wrap,
    origin: i64,
    anchor: (i64, i64),
    /// Per-pixel steps, sign-extended.
    dx: i64,
    dy: i64,
}

impl AttributePlane {
    /// Gradients come from the barycentric weights of vertices 1 and 2, which are
    /// `F20 / delta` and `F01 / delta`. Truncated toward zero like C division.
    fn new(values: [i64; 3], setup: &EdgeSetup, wrap: Wrap) -> Self {
        let [e01, _, e20] = setup.edges;
        let scale = 1i64 << setup.frac;
        let d1 = values[1] - values[0];
        let d2 = values[2] - values[0];
        let dx = wrap.sign_extend((e20.dx * d1 + e01.dx * d2) * scale / setup.delta);
        let dy = wrap.sign_extend((e20.dy * d1 + e01.dy * d2) * scale / setup.delta);

        Self {
            wrap,
            origin: values[0],
            anchor: setup.anchor,
            dx,
            dy,
        }
    }

    #[inline]
    fn at(&self, sx: i64, sy: i64, frac: u32) -> i64 {
        let offset = (self.dx * (sx - self.anchor.0) + self.dy * (sy - self.anchor.1)) >> frac;
        self.wrap.wrap(self.origin + offset)
    }

    #[inline]
    fn step(&self, acc: i64, step: i64) -> i64 {
        self.wrap.add(acc, step)
    }
}

/// Quantized triangle with its edge functions. Only built for front-facing
/// triangles.
#[derive(Copy, Clone, Debug)]
struct EdgeSetup {
    frac: u32,
    edges: [EdgeFunction; 3],
    delta: i64,
    /// Vertex 0 in fixed point.
    anchor: (i64, i64),
    /// Half-open pixel box `[min, max)`.
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl EdgeSetup {
    fn new(x: [i64; 3], y: [i64; 3], precision: Precision) -> Option<Self> {
        let coord = precision.coordinate_wrap();
        let edge = precision.edge_wrap();
        let frac = precision.fraction_bits();
        let round_up = (1i64 << frac) - 1;

        let edges = [
            EdgeFunction::new((x[0], y[0]), (x[1], y[1]), coord, edge),
            EdgeFunction::new((x[1], y[1]), (x[2], y[2]), coord, edge),
            EdgeFunction::new((x[2], y[2]), (x[0], y[0]), coord, edge),
        ];

        let delta = edge.wrap(edges[0].constant + edges[1].constant + edges[2].constant);
        if delta == 0 || edge.is_negative(delta) {
            return None;
        }

        Some(Self {
            frac,
            edges,
            delta,
            anchor: (x[0], y[0]),
            min_x: x[0].min(x[1]).min(x[2]) >> frac,
            max_x: (x[0].max(x[1]).max(x[2]) + round_up) >> frac,
            min_y: y[0].min(y[1]).min(y[2]) >> frac,
            max_y: (y[0].max(y[1]).max(y[2]) + round_up) >> frac,
        })
    }
}

pub struct Rasterizer {
    pub mode: RasterMode,
    pub bounds: BoundsPolicy,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(RasterMode::default())
    }
}

impl Rasterizer {
    pub fn new(mode: RasterMode) -> Self {
        Self {
            mode,
            bounds: BoundsPolicy::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Scan-convert one screen-space triangle into `target`.
    ///
    /// Back-facing and zero-area triangles come back as `Culled` without
    /// touching the target.
    pub fn rasterize<T: PixelTarget>(
        &self,
        triangle: &[Vertex; 3],
        target: &mut T,
    ) -> Result<TriangleOutcome, RasterError> {
        let precision = self.mode.precision;
        let width = target.width();
        let height = target.height();

        let limit = precision.pixel_limit();
        if width >= limit || height >= limit {
            return Err(RasterError::TargetTooLarge {
                width,
                height,
                limit,
                precision,
            });
        }
        if self.mode.depth_test && !target.has_depth() {
            return Err(RasterError::MissingDepthBuffer);
        }

        // Quantize. Coordinates round and wrap into signed fixed point, depth
        // rounds into 12 unsigned bits, texcoords truncate.
        let coord = precision.coordinate_wrap();
        let tex = precision.texcoord_wrap();
        let scale = (1u32 << precision.fraction_bits()) as f32;
        let tex_scale = tex.mask() as f32;

        let x = triangle.map(|v| coord.sign_extend(round_to_int(v.position.x * scale)));
        let y = triangle.map(|v| coord.sign_extend(round_to_int(v.position.y * scale)));
        let d = triangle.map(|v| DEPTH_WRAP.wrap(round_to_int(v.position.z * DEPTH_MAX as f32)));
        let u = triangle.map(|v| tex.wrap(truncate_to_int(v.texcoord.x * tex_scale)));
        let v = triangle.map(|v| tex.wrap(truncate_to_int(v.texcoord.y * tex_scale)));

        let Some(setup) = EdgeSetup::new(x, y, precision) else {
            count_call!(FUNCTION_COUNTERS.triangles_culled);
            return Ok(TriangleOutcome::Culled);
        };

        let (min_x, max_x, min_y, max_y) = self.scan_box(&setup, width, height)?;

        let planes = self.mode.interpolates().then(|| {
            [
                AttributePlane::new(d, &setup, DEPTH_WRAP),
                AttributePlane::new(u, &setup, tex),
                AttributePlane::new(v, &setup, tex),
            ]
        });

        count_call!(FUNCTION_COUNTERS.triangles_rasterized);
        Ok(self.fill(&setup, planes, (min_x, max_x, min_y, max_y), target))
    }

    /// The half-open box to scan, after applying the bounds policy.
    fn scan_box(
        &self,
        setup: &EdgeSetup,
        width: usize,
        height: usize,
    ) -> Result<(i64, i64, i64, i64), RasterError> {
        let (w, h) = (width as i64, height as i64);
        let inside = setup.min_x >= 0 && setup.min_y >= 0 && setup.max_x <= w && setup.max_y <= h;
        if inside {
            return Ok((setup.min_x, setup.max_x, setup.min_y, setup.max_y));
        }

        match self.bounds {
            BoundsPolicy::Reject => Err(RasterError::OutOfBounds {
                min_x: setup.min_x,
                max_x: setup.max_x,
                min_y: setup.min_y,
                max_y: setup.max_y,
                width,
                height,
            }),
            BoundsPolicy::Clamp => {
                count_call!(FUNCTION_COUNTERS.bounds_clamped);
                log::trace!(
                    "clamping scan box x {}..{}, y {}..{} to {}x{}",
                    setup.min_x,
                    setup.max_x,
                    setup.min_y,
                    setup.max_y,
                    width,
                    height
                );
                Ok((
                    setup.min_x.clamp(0, w),
                    setup.max_x.clamp(0, w),
                    setup.min_y.clamp(0, h),
                    setup.max_y.clamp(0, h),
                ))
            }
        }
    }

    fn fill<T: PixelTarget>(
        &self,
        setup: &EdgeSetup,
        planes: Option<[AttributePlane; 3]>,
        scan: (i64, i64, i64, i64),
        target: &mut T,
    ) -> TriangleOutcome {
        let (min_x, max_x, min_y, max_y) = scan;
        let edge = self.mode.precision.edge_wrap();
        let frac = setup.frac;
        let width = target.width();

        // Sample at the integer pixel corner, in fixed-point units.
        let sx = min_x << frac;
        let sy = min_y << frac;
        let step = 1i64 << frac;

        let edge_dx = setup.edges.map(|e| e.dx * step);
        let edge_dy = setup.edges.map(|e| e.dy * step);
        let mut edge_row = setup.edges.map(|e| e.at(edge, sx, sy));
        // Depth, U, V. Stay zero when the mode does not interpolate.
        let mut attr_row = planes.map_or([0; 3], |planes| planes.map(|p| p.at(sx, sy, frac)));

        let mut inside = 0u32;
        let mut written = 0u32;

        for py in min_y..max_y {
            let mut f = edge_row;
            let mut attr = attr_row;

            for px in min_x..max_x {
                count_call!(FUNCTION_COUNTERS.pixels_tested);

                if !edge.is_negative(f[0] | f[1] | f[2]) {
                    inside += 1;
                    let (x, y) = (px as usize, py as usize);
                    let index = if self.mode.depth_test {
                        target.test_depth_and_get_index(x, y, attr[0] as u16)
                    } else {
                        Some(y * width + x)
                    };

                    if let Some(index) = index {
                        target.write_color(index, self.pixel_color(attr[1], attr[2]));
                        written += 1;
                    }
                }

                for i in 0..3 {
                    f[i] = edge.add(f[i], edge_dx[i]);
                }
                if let Some(planes) = &planes {
                    for i in 0..3 {
                        attr[i] = planes[i].step(attr[i], planes[i].dx);
                    }
                }
            }

            for i in 0..3 {
                edge_row[i] = edge.add(edge_row[i], edge_dy[i]);
            }
            if let Some(planes) = &planes {
                for i in 0..3 {
                    attr_row[i] = planes[i].step(attr_row[i], planes[i].dy);
                }
            }
        }

        count_add!(FUNCTION_COUNTERS.pixels_inside, inside as u64);
        if self.mode.depth_test {
            count_add!(FUNCTION_COUNTERS.depth_passed, written as u64);
            count_add!(FUNCTION_COUNTERS.depth_failed, (inside - written) as u64);
        }

        TriangleOutcome::Rasterized { inside, written }
    }

    #[inline]
    fn pixel_color(&self, u: i64, v: i64) -> u32 {
        match self.mode.output {
            PixelOutput::Coverage => COVERAGE_COLOR,
            PixelOutput::Texcoord => {
                let shift = self.mode.precision.texcoord_bits() - 8;
                let u_byte = ((u >> shift) & 0xff) as u32;
                let v_byte = ((v >> shift) & 0xff) as u32;
                OPAQUE | (u_byte << 8) | v_byte
            }
        }
    }
}

/// Rasterize into caller-owned buffers.
///
/// Supplying a depth buffer selects `RasterMode::DEPTH_TESTED`, leaving it out
/// selects `RasterMode::COVERAGE`. Both buffers must hold `width * height` cells.
pub fn rasterize(
    triangle: &[Vertex; 3],
    width: usize,
    height: usize,
    depth: Option<&mut [u16]>,
    color: &mut [u32],
) -> Result<TriangleOutcome, RasterError> {
    let mode = if depth.is_some() {
        RasterMode::DEPTH_TESTED
    } else {
        RasterMode::COVERAGE
    };
    let mut target = RenderTarget::new(width, height, color, depth)?;
    Rasterizer::new(mode).rasterize(triangle, &mut target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec4};

    fn screen(x: f32, y: f32, z: f32, u: f32, v: f32) -> Vertex {
        Vertex::new(Vec4::new(x, y, z, 1.0), Vec2::new(u, v))
    }

    fn quantize(x: [i64; 3], y: [i64; 3]) -> Option<EdgeSetup> {
        EdgeSetup::new(x, y, Precision::Integer12)
    }

    #[test]
    fn precision_ranges() {
        assert_eq!(Precision::Integer12.pixel_limit(), 2048);
        assert_eq!(Precision::Subpixel11_5.pixel_limit(), 1024);
        assert_eq!(Precision::Integer12.edge_bits(), 24);
        assert_eq!(Precision::Subpixel11_5.edge_bits(), 32);
    }

    #[test]
    fn delta_is_doubled_area() {
        let setup = quantize([200, 600, 200], [100, 100, 500]).unwrap();
        assert_eq!(setup.delta, 160_000);
        assert_eq!((setup.min_x, setup.max_x), (200, 600));
        assert_eq!((setup.min_y, setup.max_y), (100, 500));
    }

    #[test]
    fn reversed_and_collinear_triangles_have_no_setup() {
        assert!(quantize([200, 200, 600], [100, 500, 100]).is_none());
        assert!(quantize([0, 10, 20], [0, 10, 20]).is_none());
    }

    #[test]
    fn edge_bias_follows_top_left_rule() {
        let setup = quantize([0, 10, 0], [0, 0, 10]).unwrap();
        let [top, diagonal, left] = setup.edges;
        let edge = Precision::Integer12.edge_wrap();

        assert_eq!(top.biased, top.constant);
        assert_eq!(left.biased, left.constant);
        assert_eq!(diagonal.biased, edge.wrap(diagonal.constant - 1));
    }

    #[test]
    fn exact_gradient_plane() {
        // Depth 0 at x = 0 rising to 400 at x = 100: exactly 4 per pixel.
        let setup = quantize([0, 100, 0], [0, 0, 100]).unwrap();
        let plane = AttributePlane::new([0, 400, 0], &setup, DEPTH_WRAP);
        assert_eq!((plane.dx, plane.dy), (4, 0));
        assert_eq!(plane.at(25, 60, 0), 100);
    }

    #[test]
    fn negative_gradients_are_sign_extended() {
        let setup = quantize([0, 100, 0], [0, 0, 100]).unwrap();
        let plane = AttributePlane::new([400, 0, 400], &setup, DEPTH_WRAP);
        assert_eq!(plane.dx, -4);
        assert_eq!(plane.at(100, 0, 0), 0);
        // One step further wraps rather than going negative.
        assert_eq!(plane.step(0, plane.dx), 4092);
    }

    #[test]
    fn coverage_without_depth_skips_interpolation() {
        assert!(!RasterMode::COVERAGE.interpolates());
        assert!(RasterMode::DEPTH_TESTED.interpolates());
        assert!(RasterMode { depth_test: true, ..RasterMode::COVERAGE }.interpolates());
        assert!(RasterMode { output: PixelOutput::Texcoord, ..RasterMode::COVERAGE }.interpolates());
    }

    #[test]
    fn coverage_fill_matches_depth_tested_footprint() {
        // Steep texcoord and depth ramps change nothing about which pixels a
        // non-interpolating fill covers.
        let tri = [
            screen(2.0, 3.0, 0.1, 0.0, 1.0),
            screen(29.0, 5.0, 0.9, 1.0, 0.0),
            screen(6.0, 30.0, 0.4, 0.3, 0.7),
        ];
        let integer_coverage = RasterMode {
            precision: Precision::Integer12,
            ..RasterMode::COVERAGE
        };
        assert!(!integer_coverage.interpolates());

        let mut depth_tested = Framebuffer::new(32, 32);
        let mut coverage = Framebuffer::new(32, 32);
        let a = Rasterizer::new(RasterMode::DEPTH_TESTED)
            .rasterize(&tri, &mut depth_tested)
            .unwrap();
        let b = Rasterizer::new(integer_coverage)
            .rasterize(&tri, &mut coverage.as_color_target())
            .unwrap();

        assert_eq!(a, b);
        for (index, (&lit, &mask)) in depth_tested
            .color_buffer
            .iter()
            .zip(&coverage.color_buffer)
            .enumerate()
        {
            assert_eq!(lit != 0, mask == COVERAGE_COLOR, "pixel {}", index);
        }
        assert!(coverage.depth_buffer.iter().all(|&d| d == 0));
    }

    #[test]
    fn texcoord_packing_uses_top_byte() {
        let rasterizer = Rasterizer::new(RasterMode::DEPTH_TESTED);
        assert_eq!(rasterizer.pixel_color(0xabc, 0x123), 0xff00_ab12);

        let sub = Rasterizer::new(RasterMode {
            output: PixelOutput::Texcoord,
            ..RasterMode::COVERAGE
        });
        assert_eq!(sub.pixel_color(0xabcd, 0x1234), 0xff00_ab12);
    }

    #[test]
    fn coordinates_wrap_instead_of_saturating() {
        // x = 4095 quantizes to -1 in signed 12-bit, pulling the box left of zero.
        let tri = [
            screen(4095.0, 0.0, 0.5, 0.0, 0.0),
            screen(4.0, 0.0, 0.5, 0.0, 0.0),
            screen(0.0, 4.0, 0.5, 0.0, 0.0),
        ];
        let mut fb = Framebuffer::new(8, 8);
        let rasterizer = Rasterizer::new(RasterMode::DEPTH_TESTED).with_bounds(BoundsPolicy::Reject);
        let err = rasterizer.rasterize(&tri, &mut fb).unwrap_err();
        assert!(matches!(err, RasterError::OutOfBounds { min_x: -1, .. }));
    }

    #[test]
    fn free_function_picks_mode_from_depth_buffer() {
        let tri = [
            screen(1.0, 1.0, 0.5, 0.0, 0.0),
            screen(7.0, 1.0, 0.5, 0.0, 0.0),
            screen(1.0, 7.0, 0.5, 0.0, 0.0),
        ];

        let mut color = vec![0u32; 64];
        let outcome = rasterize(&tri, 8, 8, None, &mut color).unwrap();
        assert!(outcome.pixels_written() > 0);
        assert!(color.iter().all(|&c| c == 0 || c == COVERAGE_COLOR));

        let mut color = vec![0u32; 64];
        let mut depth = vec![0u16; 64];
        let outcome = rasterize(&tri, 8, 8, Some(&mut depth), &mut color).unwrap();
        assert!(outcome.pixels_written() > 0);
        assert!(color.iter().all(|&c| c == 0 || c >> 24 == 0xff));
        assert!(depth.iter().any(|&d| d == 2048));
    }
}
