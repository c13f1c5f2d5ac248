//! Convex planar `Polygon`s and their supporting plane

use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::Point3;

/// A convex polygon: an ordered loop of at least three coplanar vertices,
/// the cached supporting [`Plane`], and an opaque metadata tag.
///
/// The tag records which submesh (material) the polygon came from and is
/// propagated unchanged through every split, so the result mesh can be
/// regrouped by material.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub metadata: Option<S>,
}

impl<S: Clone> Polygon<S> {
    /// Build a polygon from a vertex loop, computing the supporting plane
    /// from the loop itself (Newell's method).
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        let plane = Plane::from_vertices(&vertices);
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Build a polygon that keeps a known supporting plane.
    ///
    /// Split fragments reuse the plane of the polygon they were cut from;
    /// recomputing it from the fragment's vertices would drift numerically.
    pub const fn with_plane(vertices: Vec<Vertex>, plane: Plane, metadata: Option<S>) -> Self {
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Reverse winding order, flip all vertex normals, and flip the cached
    /// plane, turning the polygon inside out.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Fan-triangulate this polygon into `n - 2` triangles sharing vertex 0.
    /// Valid because clipping a convex polygon always yields a convex polygon.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }
        (1..self.vertices.len() - 1)
            .map(|i| {
                [
                    self.vertices[0].clone(),
                    self.vertices[i].clone(),
                    self.vertices[i + 1].clone(),
                ]
            })
            .collect()
    }

    /// Axis-aligned bounds of this polygon's vertices.
    pub fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for v in &self.vertices {
            mins.x = mins.x.min(v.pos.x);
            mins.y = mins.y.min(v.pos.y);
            mins.z = mins.z.min(v.pos.z);
            maxs.x = maxs.x.max(v.pos.x);
            maxs.y = maxs.y.max(v.pos.y);
            maxs.z = maxs.z.max(v.pos.z);
        }
        Aabb::new(mins, maxs)
    }

    /// Surface area, summed over the triangle fan.
    pub fn area(&self) -> Real {
        self.triangulate()
            .iter()
            .map(|tri| {
                let a = tri[1].pos - tri[0].pos;
                let b = tri[2].pos - tri[0].pos;
                a.cross(&b).norm() * 0.5
            })
            .sum()
    }
}
