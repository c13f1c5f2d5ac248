//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// A vertex of a polygon, holding position and the interpolable attribute
/// channels (normal, texture coordinate, color) carried by the host mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub uv: Vector2<Real>,
    pub color: Vector4<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in the common working space
    /// * `normal` – (optionally non‑unit) normal; it will be **copied
    ///              verbatim**, so make sure it is oriented the way
    ///              you need it for lighting / BSP tests.
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex {
            pos,
            normal,
            uv: Vector2::new(0.0, 0.0),
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Create a new [`Vertex`] with all attribute channels set.
    pub const fn with_attributes(
        pos: Point3<Real>,
        normal: Vector3<Real>,
        uv: Vector2<Real>,
        color: Vector4<Real>,
    ) -> Self {
        Vertex {
            pos,
            normal,
            uv,
            color,
        }
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return the barycentric linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Every attribute channel is linearly interpolated, component-wise. Used
    /// whenever an edge is cut by a splitting plane.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        // For positions (Point3): p(t) = p0 + t * (p1 - p0)
        let new_pos = self.pos + (other.pos - self.pos) * t;

        // Attribute channels interpolate the same way
        let new_normal = self.normal + (other.normal - self.normal) * t;
        let new_uv = self.uv + (other.uv - self.uv) * t;
        let new_color = self.color + (other.color - self.color) * t;

        Vertex::with_attributes(new_pos, new_normal, new_uv, new_color)
    }
}

#[cfg(test)]
mod tests {
    use super::Vertex;
    use nalgebra::{Point3, Vector2, Vector3, Vector4};

    #[test]
    fn interpolate_midpoint_covers_all_channels() {
        let a = Vertex::with_attributes(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::x(),
            Vector2::new(0.0, 0.0),
            Vector4::new(0.0, 0.0, 0.0, 1.0),
        );
        let b = Vertex::with_attributes(
            Point3::new(2.0, 0.0, 0.0),
            Vector3::y(),
            Vector2::new(1.0, 1.0),
            Vector4::new(1.0, 1.0, 1.0, 1.0),
        );

        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.pos, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mid.normal, Vector3::new(0.5, 0.5, 0.0));
        assert_eq!(mid.uv, Vector2::new(0.5, 0.5));
        assert_eq!(mid.color, Vector4::new(0.5, 0.5, 0.5, 1.0));
    }
}
