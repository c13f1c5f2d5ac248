//! Oriented splitting plane with epsilon-tolerant point classification

use crate::float_types::Real;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Classification bitmask: a polygon's class is the OR of its vertex classes,
// so FRONT | BACK == SPANNING falls out for free.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane in 3D space with unit `normal` and signed offset `w` from the
/// origin along the normal: points `p` on the plane satisfy `n·p = w`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and offset.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane {
            normal: normal.normalize(),
            w,
        }
    }

    /// Create a plane from three points. The normal direction follows the
    /// right-hand rule: `(b - a) × (c - a)`.
    ///
    /// A degenerate (collinear) triple yields the Z plane through the origin
    /// rather than a NaN normal.
    pub fn from_points(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Self {
        let normal = (b - a).cross(&(c - a));
        if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
            return Plane {
                normal: Vector3::z(),
                w: 0.0,
            };
        }
        let normal = normal.normalize();
        Plane {
            normal,
            w: normal.dot(&a.coords),
        }
    }

    /// Compute the supporting plane of a vertex loop using Newell's method,
    /// which stays stable when the first three vertices are nearly collinear.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        if vertices.len() < 3 {
            return Plane {
                normal: Vector3::z(),
                w: 0.0,
            };
        }

        let mut normal = Vector3::zeros();
        for (i, current) in vertices.iter().enumerate() {
            let next = &vertices[(i + 1) % vertices.len()];
            normal.x += (current.pos.y - next.pos.y) * (current.pos.z + next.pos.z);
            normal.y += (current.pos.z - next.pos.z) * (current.pos.x + next.pos.x);
            normal.z += (current.pos.x - next.pos.x) * (current.pos.y + next.pos.y);
        }

        if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
            return Plane {
                normal: Vector3::z(),
                w: 0.0,
            };
        }
        let normal = normal.normalize();
        Plane {
            normal,
            w: normal.dot(&vertices[0].pos.coords),
        }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Signed distance from the origin along `normal`.
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane orientation in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane.
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Classify `point` against the plane with tolerance `eps`:
    /// [`FRONT`], [`BACK`], or [`COPLANAR`] when the signed distance is
    /// within `[-eps, eps]`.
    pub fn orient_point(&self, point: &Point3<Real>, eps: Real) -> i8 {
        let t = self.normal.dot(&point.coords) - self.w;
        if t > eps {
            FRONT
        } else if t < -eps {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Classify a whole polygon: the OR of its vertex classifications, so a
    /// polygon with vertices on both sides reports [`SPANNING`].
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>, eps: Real) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos, eps))
    }

    /// Split `polygon` by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// A polygon entirely within `eps` of the plane goes to `coplanar_front`
    /// or `coplanar_back` depending on whether its own normal agrees with the
    /// plane normal. A polygon entirely on one side goes whole to `front` or
    /// `back`. A spanning polygon is cut: each edge crossing the plane emits
    /// an interpolated vertex into both output loops, and each loop with at
    /// least 3 vertices becomes a new polygon carrying the original metadata
    /// tag and plane.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon<S: Clone>(
        &self,
        polygon: &Polygon<S>,
        eps: Real,
    ) -> (
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
    ) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos, eps))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),

            // True spanning – do the split
            _ => {
                let mut split_front: Vec<Vertex> = Vec::with_capacity(polygon.vertices.len() + 2);
                let mut split_back: Vec<Vertex> = Vec::with_capacity(polygon.vertices.len() + 2);

                for i in 0..polygon.vertices.len() {
                    // j is the vertex following i, wrapping to the first vertex after the last
                    let j = (i + 1) % polygon.vertices.len();
                    let type_i = types[i];
                    let type_j = types[j];
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(vertex_i.clone());
                    }
                    if type_i != FRONT {
                        split_back.push(vertex_i.clone());
                    }

                    // If the edge between these two vertices crosses the plane,
                    // compute the crossing and add it to both sets
                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        // The denominator is the difference of the two signed
                        // distances; guard against a division that could
                        // produce NaN/Inf at extreme tolerances.
                        if denom.abs() > Real::EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let crossing = vertex_i.interpolate(vertex_j, t);
                            split_front.push(crossing.clone());
                            split_back.push(crossing);
                        }
                    }
                }

                // Loops reduced below 3 vertices are degenerate slivers; drop them
                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(
                        split_front,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(
                        split_back,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
