/// Clip space -> NDC -> screen space.
/// Both transforms are stateless and produce a new vertex.
use super::Vertex;

/// Divide `x`, `y` and `z` by `w`.
///
/// `w` is carried through untouched and means nothing afterwards. The clipper
/// has already removed everything at `w == 0`.
#[inline]
pub fn perspective_divide(v: &Vertex) -> Vertex {
    let p = v.position;
    let mut out = *v;
    out.position.x = p.x / p.w;
    out.position.y = p.y / p.w;
    out.position.z = p.z / p.w;
    out
}

/// Map NDC `[-1, 1]` onto pixel coordinates `[0, width] x [0, height]`.
///
/// No y flip. `z` stays in NDC; the rasterizer rescales it into fixed-point depth.
#[inline]
pub fn screen_transform(v: &Vertex, width: f32, height: f32) -> Vertex {
    let mut out = *v;
    out.position.x = (v.position.x * width + width) / 2.0;
    out.position.y = (v.position.y * height + height) / 2.0;
    out
}

#[inline]
pub fn project_to_screen(v: &Vertex, width: f32, height: f32) -> Vertex {
    screen_transform(&perspective_divide(v), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec4};

    #[test]
    fn divide_leaves_w_and_texcoord() {
        let v = Vertex::new(Vec4::new(2.0, -4.0, 1.0, 2.0), Vec2::new(0.1, 0.9));
        let out = perspective_divide(&v);
        assert_eq!(out.position, Vec4::new(1.0, -2.0, 0.5, 2.0));
        assert_eq!(out.texcoord, v.texcoord);
    }

    #[test]
    fn ndc_corners_map_to_screen_corners() {
        let (w, h) = (800.0, 600.0);
        let lo = screen_transform(&Vertex::new(Vec4::new(-1.0, -1.0, 0.3, 1.0), Vec2::ZERO), w, h);
        let hi = screen_transform(&Vertex::new(Vec4::new(1.0, 1.0, -0.3, 1.0), Vec2::ZERO), w, h);
        let mid = screen_transform(&Vertex::new(Vec4::new(0.0, 0.0, 0.0, 1.0), Vec2::ZERO), w, h);

        assert_eq!((lo.position.x, lo.position.y, lo.position.z), (0.0, 0.0, 0.3));
        assert_eq!((hi.position.x, hi.position.y, hi.position.z), (800.0, 600.0, -0.3));
        assert_eq!((mid.position.x, mid.position.y), (400.0, 300.0));
    }

    #[test]
    fn project_composes_divide_and_viewport() {
        let v = Vertex::new(Vec4::new(1.0, -1.0, 0.5, 2.0), Vec2::ZERO);
        let out = project_to_screen(&v, 100.0, 50.0);
        assert_eq!(out.position.x, 75.0);
        assert_eq!(out.position.y, 12.5);
        assert_eq!(out.position.z, 0.25);
    }
}
