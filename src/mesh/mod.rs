//! `Mesh`: a polygon soup for one boolean operand, and the boolean operations themselves

use crate::errors::ValidationError;
use crate::float_types::parry3d::bounding_volume::{Aabb, BoundingVolume};
use crate::float_types::Real;
use crate::mesh::{bsp::Node, plane::Plane, polygon::Polygon};
use nalgebra::{Matrix4, Point3, Vector3, partial_max, partial_min};
use std::sync::OnceLock;

pub mod bsp;
pub mod buffers;
pub mod plane;
pub mod polygon;
pub mod vertex;

/// A solid described by an unstructured list of polygons, plus a lazily
/// cached bounding box.
///
/// Each boolean operation builds fresh BSP trees from the operand soups,
/// runs the clip/invert sequence, and collects the result into a new `Mesh`.
/// Nothing survives between calls; there is no shared or cached tree state.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone> {
    /// 3D polygons making up the solid
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl<S: Clone> Mesh<S> {
    /// Returns a new empty Mesh
    pub const fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut mesh = Mesh::new();
        mesh.polygons = polygons.to_vec();
        mesh
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding‑box tests
    fn partition_polys(
        polys: &[Polygon<S>],
        other_bb: &Aabb,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
        let mut maybe = Vec::new();
        let mut never = Vec::new();
        for p in polys {
            if p.bounding_box().intersects(other_bb) {
                maybe.push(p.clone());
            } else {
                never.push(p.clone());
            }
        }
        (maybe, never)
    }

    /// Return a new Mesh representing the union of the two Meshes.
    ///
    /// ```text
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    pub fn union(&self, other: &Mesh<S>, eps: Real) -> Mesh<S> {
        // avoid splitting obvious non‑intersecting faces
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a = Node::from_polygons(&a_clip, eps);
        let mut b = Node::from_polygons(&b_clip, eps);

        a.clip_to(&b, eps);
        b.clip_to(&a, eps);
        b.invert();
        b.clip_to(&a, eps);
        b.invert();
        a.build(&b.all_polygons(), eps);

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);
        final_polys.extend(b_passthru);

        Mesh::from_polygons(&final_polys)
    }

    /// Return a new Mesh representing the subtraction `self - other`.
    ///
    /// ```text
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    pub fn difference(&self, other: &Mesh<S>, eps: Real) -> Mesh<S> {
        // avoid splitting obvious non‑intersecting faces
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, _b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a = Node::from_polygons(&a_clip, eps);
        let mut b = Node::from_polygons(&b_clip, eps);

        a.invert();
        a.clip_to(&b, eps);
        b.clip_to(&a, eps);
        b.invert();
        b.clip_to(&a, eps);
        b.invert();
        a.build(&b.all_polygons(), eps);
        a.invert();

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);

        Mesh::from_polygons(&final_polys)
    }

    /// Return a new Mesh representing the intersection of the two Meshes.
    ///
    /// ```text
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    pub fn intersection(&self, other: &Mesh<S>, eps: Real) -> Mesh<S> {
        let mut a = Node::from_polygons(&self.polygons, eps);
        let mut b = Node::from_polygons(&other.polygons, eps);

        a.invert();
        b.clip_to(&a, eps);
        b.invert();
        a.clip_to(&b, eps);
        b.clip_to(&a, eps);
        a.build(&b.all_polygons(), eps);
        a.invert();

        Mesh::from_polygons(&a.all_polygons())
    }

    /// Triangulate each polygon in the Mesh returning a Mesh containing only triangles
    pub fn triangulate(&self) -> Mesh<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate().into_iter().map(|tri| {
                    Polygon::with_plane(tri.to_vec(), poly.plane.clone(), poly.metadata.clone())
                })
            })
            .collect::<Vec<_>>();

        Mesh::from_polygons(&triangles)
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    /// Normals are transformed by the inverse transpose.
    ///
    /// ## Errors
    /// If the matrix is not invertible.
    pub fn transform(&self, mat: &Matrix4<Real>) -> Result<Mesh<S>, ValidationError> {
        let mat_inv_transpose = mat
            .try_inverse()
            .ok_or(ValidationError::NonInvertibleTransform)?
            .transpose();
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                let homog_pos = mat * vert.pos.to_homogeneous();
                vert.pos = Point3::from_homogeneous(homog_pos)
                    .ok_or(ValidationError::NonInvertibleTransform)?;

                vert.normal = mat_inv_transpose.transform_vector(&vert.normal).normalize();
            }

            // keep the cached plane consistent with the new vertex positions
            poly.plane = Plane::from_vertices(&poly.vertices);
        }

        // invalidate the old cached bounding box
        mesh.bounding_box = OnceLock::new();

        Ok(mesh)
    }

    /// Returns a new Mesh translated by `vector`.
    pub fn translate_vector(&self, vector: Vector3<Real>) -> Mesh<S> {
        let mut mesh = self.clone();
        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                vert.pos += vector;
            }
            // a pure translation shifts the plane offset along its normal
            poly.plane.w += poly.plane.normal.dot(&vector);
        }
        mesh.bounding_box = OnceLock::new();
        mesh
    }

    /// Returns a new Mesh translated by x, y, and z.
    pub fn translate(&self, x: Real, y: Real, z: Real) -> Mesh<S> {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Invert this Mesh (flip inside vs. outside)
    pub fn inverse(&self) -> Mesh<S> {
        let mut mesh = self.clone();
        for p in &mut mesh.polygons {
            p.flip();
        }
        mesh
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all `polygons`.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            // Track overall min/max in x, y, z among all 3D polygons
            let mut min_x = Real::MAX;
            let mut min_y = Real::MAX;
            let mut min_z = Real::MAX;
            let mut max_x = -Real::MAX;
            let mut max_y = -Real::MAX;
            let mut max_z = -Real::MAX;

            for poly in &self.polygons {
                for v in &poly.vertices {
                    min_x = *partial_min(&min_x, &v.pos.x).unwrap_or(&min_x);
                    min_y = *partial_min(&min_y, &v.pos.y).unwrap_or(&min_y);
                    min_z = *partial_min(&min_z, &v.pos.z).unwrap_or(&min_z);

                    max_x = *partial_max(&max_x, &v.pos.x).unwrap_or(&max_x);
                    max_y = *partial_max(&max_y, &v.pos.y).unwrap_or(&max_y);
                    max_z = *partial_max(&max_z, &v.pos.z).unwrap_or(&max_z);
                }
            }

            // If still uninitialized (e.g., no polygons), return a trivial AABB at origin
            if min_x > max_x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            Aabb::new(
                Point3::new(min_x, min_y, min_z),
                Point3::new(max_x, max_y, max_z),
            )
        })
    }
}

impl<S: Clone> Default for Mesh<S> {
    fn default() -> Self {
        Self::new()
    }
}
