/// Homogeneous clip-space clipping of a single triangle against the view frustum.
///
/// Sutherland-Hodgman, one pass per plane. Every pass can add at most one vertex
/// to a convex polygon, so a triangle never grows past 3 + 6 = 9 vertices and the
/// whole clip runs on two fixed-size stack buffers.
use super::Vertex;
use glam::Vec4;

/// Upper bound on the vertex count of a clipped triangle.
pub const MAX_CLIP_VERTICES: usize = 9;

/// The six canonical frustum planes in clip space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClipPlane {
    /// `z >= -w`
    Near,
    /// `z <= w`
    Far,
    /// `x >= -w`
    Left,
    /// `x <= w`
    Right,
    /// `y <= w`
    Bottom,
    /// `y >= -w`
    Top,
}

impl ClipPlane {
    /// Planes in the order the clipper visits them.
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Near,
        ClipPlane::Far,
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
    ];

    /// Signed distance to the plane; non-negative on the visible side.
    #[inline]
    pub fn distance(self, p: Vec4) -> f32 {
        match self {
            ClipPlane::Near => p.z + p.w,
            ClipPlane::Far => -p.z + p.w,
            ClipPlane::Left => p.x + p.w,
            ClipPlane::Right => -p.x + p.w,
            ClipPlane::Bottom => -p.y + p.w,
            ClipPlane::Top => p.y + p.w,
        }
    }

    /// NaN distances compare false, so vertices with NaN coordinates are outside.
    #[inline]
    pub fn contains(self, p: Vec4) -> bool {
        self.distance(p) >= 0.0
    }

    /// Intersect edge `from -> to` with this plane.
    ///
    /// Only called for straddling edges (one distance `>= 0`, the other `< 0`),
    /// so `d1 - d2` is never zero.
    /// An edge to a NaN vertex has no intersection.
    #[inline]
    fn intersect(self, from: &Vertex, to: &Vertex) -> Option<Vertex> {
        let d1 = self.distance(from.position);
        let d2 = self.distance(to.position);
        debug_assert!((d1 >= 0.0) != (d2 >= 0.0));
        let t = d1 / (d1 - d2);
        if t.is_nan() {
            return None;
        }
        Some(from.lerp(to, t))
    }
}

/// Output of `clip_triangle`: a convex polygon, still in clip space.
#[derive(Copy, Clone, Debug)]
pub struct ClippedPolygon {
    vertices: [Vertex; MAX_CLIP_VERTICES],
    len: usize,
}

impl ClippedPolygon {
    #[inline]
    pub fn empty() -> Self {
        Self {
            vertices: [Vertex::default(); MAX_CLIP_VERTICES],
            len: 0,
        }
    }

    #[inline]
    pub fn from_triangle(triangle: &[Vertex; 3]) -> Self {
        let mut polygon = Self::empty();
        polygon.vertices[..3].copy_from_slice(triangle);
        polygon.len = 3;
        polygon
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices[..self.len]
    }

    /// Fan triangulation sharing vertex 0: yields `len - 2` triangles, or none
    /// when fewer than three vertices survived.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        let fan = self.len.saturating_sub(2);
        (1..=fan).map(move |i| [self.vertices[0], self.vertices[i], self.vertices[i + 1]])
    }

    /// A convex input gains at most one vertex per plane, so the bound only
    /// trips on rounding-induced concavity; extra vertices are dropped.
    #[inline]
    fn push(&mut self, vertex: Vertex) {
        if self.len < MAX_CLIP_VERTICES {
            self.vertices[self.len] = vertex;
            self.len += 1;
        }
    }
}

/// Clip a convex polygon against one plane, writing the result into `output`.
pub fn clip_polygon_against(plane: ClipPlane, input: &ClippedPolygon, output: &mut ClippedPolygon) {
    output.len = 0;
    let polygon = input.as_slice();
    let Some(&last) = polygon.last() else {
        return;
    };

    let mut prev = last;
    let mut prev_inside = plane.contains(prev.position);

    for &curr in polygon {
        let curr_inside = plane.contains(curr.position);
        match (prev_inside, curr_inside) {
            (true, true) => output.push(curr),
            (true, false) => {
                if let Some(crossing) = plane.intersect(&prev, &curr) {
                    output.push(crossing);
                }
            }
            (false, true) => {
                if let Some(crossing) = plane.intersect(&prev, &curr) {
                    output.push(crossing);
                }
                output.push(curr);
            }
            (false, false) => {}
        }

        prev = curr;
        prev_inside = curr_inside;
    }
}

/// Clip a clip-space triangle against all six frustum planes.
///
/// A triangle entirely inside comes back unchanged and in order. An empty or
/// two-vertex result means there is nothing to draw.
pub fn clip_triangle(triangle: &[Vertex; 3]) -> ClippedPolygon {
    let mut current = ClippedPolygon::from_triangle(triangle);
    let mut scratch = ClippedPolygon::empty();

    for plane in ClipPlane::ALL {
        if current.is_empty() {
            break;
        }
        clip_polygon_against(plane, &current, &mut scratch);
        std::mem::swap(&mut current, &mut scratch);
    }

    current
}
