/// Geometry stage: vertices, frustum clipping and projection.
/// Every stage produces new vertices from its inputs; nothing is mutated in place.
pub mod clipper;
pub mod projection;

pub use clipper::{clip_triangle, ClipPlane, ClippedPolygon, MAX_CLIP_VERTICES};
pub use projection::{perspective_divide, project_to_screen, screen_transform};

use glam::{Mat4, Vec2, Vec3, Vec4};

/// A homogeneous position plus one texture coordinate pair.
///
/// Which space `position` lives in depends on the stage that produced it:
/// clip space before `perspective_divide`, NDC after it, and pixel
/// coordinates (with NDC depth in `z`) after `screen_transform`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub texcoord: Vec2,
}

impl Vertex {
    #[inline]
    pub const fn new(position: Vec4, texcoord: Vec2) -> Self {
        Self { position, texcoord }
    }

    /// Build a vertex from a 3D point with `w = 1`.
    #[inline]
    pub fn from_position3(position: Vec3, texcoord: Vec2) -> Self {
        Self {
            position: position.extend(1.0),
            texcoord,
        }
    }

    /// Apply a model-view-projection matrix. The result is in clip space.
    #[inline]
    pub fn transformed(&self, transform: &Mat4) -> Self {
        Self {
            position: *transform * self.position,
            texcoord: self.texcoord,
        }
    }

    /// Interpolate position and texcoord with the same weight.
    #[inline]
    pub fn lerp(&self, other: &Vertex, t: f32) -> Self {
        Self {
            position: lerp_vec4(self.position, other.position, t),
            texcoord: lerp_vec2(self.texcoord, other.texcoord, t),
        }
    }
}

/// A triangle is just three vertices; winding decides front/back facing.
pub type Triangle = [Vertex; 3];

// Always `(1 - t) * a + t * b`; `a + (b - a) * t` rounds differently.
#[inline]
pub fn lerp_vec4(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    (1.0 - t) * a + t * b
}

#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    (1.0 - t) * a + t * b
}
