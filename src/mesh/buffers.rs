//! Conversion between host mesh buffers and the `Polygon` soup the BSP core works on

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Matrix4, Point3, Vector2, Vector3, Vector4};
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Host-facing mesh representation: one position buffer, optional per-vertex
/// attribute buffers, and one triangle index buffer per submesh (material).
///
/// Attribute buffers are either empty (a default value is substituted for
/// every vertex) or exactly as long as `positions`. The position of a submesh
/// in `submeshes` is its material id, and survives a boolean operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<Point3<Real>>,
    pub normals: Vec<Vector3<Real>>,
    pub uvs: Vec<Vector2<Real>>,
    pub colors: Vec<Vector4<Real>>,
    pub submeshes: Vec<Vec<u32>>,
}

impl MeshBuffers {
    /// Total triangle count over all submeshes.
    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|indices| indices.len() / 3).sum()
    }

    /// A mesh with no triangles at all. An empty boolean result (e.g. the
    /// intersection of disjoint solids) converts to this.
    pub fn is_empty(&self) -> bool {
        self.submeshes.iter().all(|indices| indices.is_empty())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let expected = self.positions.len();
        for (name, len) in [
            ("normal", self.normals.len()),
            ("uv", self.uvs.len()),
            ("color", self.colors.len()),
        ] {
            if len != 0 && len != expected {
                return Err(ValidationError::AttributeLengthMismatch {
                    buffer: name,
                    len,
                    expected,
                });
            }
        }

        for (submesh, indices) in self.submeshes.iter().enumerate() {
            if indices.len() % 3 != 0 {
                return Err(ValidationError::PartialTriangle {
                    submesh,
                    len: indices.len(),
                });
            }
            for &index in indices {
                if index as usize >= expected {
                    return Err(ValidationError::IndexOutOfBounds {
                        submesh,
                        index,
                        len: expected,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Quantized welding key: two vertices weld when every channel lands in the
/// same `eps`-sized cell.
#[derive(PartialEq, Eq, Hash)]
struct WeldKey([i64; 12]);

impl WeldKey {
    fn new(v: &Vertex, inv_eps: Real) -> Self {
        let q = |x: Real| (x * inv_eps).round() as i64;
        WeldKey([
            q(v.pos.x),
            q(v.pos.y),
            q(v.pos.z),
            q(v.normal.x),
            q(v.normal.y),
            q(v.normal.z),
            q(v.uv.x),
            q(v.uv.y),
            q(v.color.x),
            q(v.color.y),
            q(v.color.z),
            q(v.color.w),
        ])
    }
}

impl Mesh<u32> {
    /// Convert host buffers into a polygon soup in the common working space.
    ///
    /// Positions are transformed by `to_common`; normals by its inverse
    /// transpose. Every triangle becomes one `Polygon` tagged with its submesh
    /// index. Triangles with near-zero area are dropped here, silently.
    ///
    /// ## Errors
    /// If an index is out of range, an attribute buffer length disagrees with
    /// the position buffer, a submesh holds a partial triangle, or `to_common`
    /// is not invertible.
    pub fn from_buffers(
        buffers: &MeshBuffers,
        to_common: &Matrix4<Real>,
        eps: Real,
    ) -> Result<Mesh<u32>, ValidationError> {
        buffers.validate()?;

        let normal_matrix = to_common
            .try_inverse()
            .ok_or(ValidationError::NonInvertibleTransform)?
            .transpose();

        // Positions into the common space up front; shared vertices transform once.
        let positions: Vec<Point3<Real>> = buffers
            .positions
            .iter()
            .map(|p| {
                Point3::from_homogeneous(to_common * p.to_homogeneous())
                    .ok_or(ValidationError::NonInvertibleTransform)
            })
            .collect::<Result<_, _>>()?;

        let mut polygons = Vec::new();
        for (submesh, indices) in buffers.submeshes.iter().enumerate() {
            for tri in indices.chunks_exact(3) {
                let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
                let (a, b, c) = (positions[i0], positions[i1], positions[i2]);

                let doubled_area_normal = (b - a).cross(&(c - a));
                if doubled_area_normal.norm_squared() <= eps * eps {
                    // degenerate triangle
                    continue;
                }
                let face_normal = doubled_area_normal.normalize();

                let vertices = [i0, i1, i2]
                    .iter()
                    .zip([a, b, c])
                    .map(|(&i, pos)| {
                        let normal = if buffers.normals.is_empty() {
                            face_normal
                        } else {
                            normal_matrix
                                .transform_vector(&buffers.normals[i])
                                .normalize()
                        };
                        let uv = if buffers.uvs.is_empty() {
                            Vector2::new(0.0, 0.0)
                        } else {
                            buffers.uvs[i]
                        };
                        let color = if buffers.colors.is_empty() {
                            Vector4::new(1.0, 1.0, 1.0, 1.0)
                        } else {
                            buffers.colors[i]
                        };
                        Vertex::with_attributes(pos, normal, uv, color)
                    })
                    .collect();

                polygons.push(Polygon::new(vertices, Some(submesh as u32)));
            }
        }

        Ok(Mesh::from_polygons(&polygons))
    }

    /// Convert this polygon soup back into host buffers.
    ///
    /// Polygons are grouped by their submesh tag (untagged polygons fall into
    /// submesh 0), fan-triangulated, and welded: vertices identical in every
    /// channel within `eps` share one buffer slot. A soup with zero polygons
    /// yields structurally empty buffers.
    pub fn to_buffers(&self, eps: Real) -> MeshBuffers {
        let mut groups: BTreeMap<u32, Vec<&Polygon<u32>>> = BTreeMap::new();
        for poly in &self.polygons {
            groups
                .entry(poly.metadata.unwrap_or(0))
                .or_default()
                .push(poly);
        }

        let inv_eps = 1.0 / eps.max(Real::EPSILON);
        let mut buffers = MeshBuffers::default();
        let mut welded: HashMap<WeldKey, u32> = HashMap::new();

        // One submesh slot per tag up to the largest one seen, so a tag keeps
        // its submesh position even when an operation consumed all polygons of
        // a lower tag.
        let submesh_count = groups.keys().next_back().map_or(0, |&tag| tag as usize + 1);
        buffers.submeshes = vec![Vec::new(); submesh_count];

        for (&tag, polys) in &groups {
            let mut indices = Vec::new();
            for poly in polys {
                for tri in poly.triangulate() {
                    for vertex in &tri {
                        let index = *welded
                            .entry(WeldKey::new(vertex, inv_eps))
                            .or_insert_with(|| {
                                buffers.positions.push(vertex.pos);
                                buffers.normals.push(vertex.normal);
                                buffers.uvs.push(vertex.uv);
                                buffers.colors.push(vertex.color);
                                (buffers.positions.len() - 1) as u32
                            });
                        indices.push(index);
                    }
                }
            }
            buffers.submeshes[tag as usize] = indices;
        }

        buffers
    }
}
