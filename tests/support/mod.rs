//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use meshcsg::float_types::Real;
use meshcsg::mesh::{Mesh, polygon::Polygon, vertex::Vertex};
use meshcsg::MeshBuffers;
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Axis-aligned cube centered at `center` with half-extent `half`, as six
/// outward-wound quads. The standard boolean test operand.
pub fn cube_mesh(center: [Real; 3], half: Real) -> Mesh<()> {
    Mesh::from_polygons(&cube_quads(center, half, None))
}

/// Same cube, with every quad tagged with `metadata`.
pub fn cube_quads<S: Clone>(
    center: [Real; 3],
    half: Real,
    metadata: Option<S>,
) -> Vec<Polygon<S>> {
    let [cx, cy, cz] = center;
    let p = |sx: Real, sy: Real, sz: Real| {
        Point3::new(cx + sx * half, cy + sy * half, cz + sz * half)
    };

    // (outward normal, CCW quad seen from outside)
    let faces: [(Vector3<Real>, [Point3<Real>; 4]); 6] = [
        (
            -Vector3::z(),
            [p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, -1.0, -1.0)],
        ),
        (
            Vector3::z(),
            [p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0)],
        ),
        (
            -Vector3::x(),
            [p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0)],
        ),
        (
            Vector3::x(),
            [p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0), p(1.0, -1.0, 1.0)],
        ),
        (
            -Vector3::y(),
            [p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(-1.0, -1.0, 1.0)],
        ),
        (
            Vector3::y(),
            [p(-1.0, 1.0, -1.0), p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0)],
        ),
    ];

    faces
        .iter()
        .map(|(normal, corners)| {
            let vertices = corners.iter().map(|&pos| Vertex::new(pos, *normal)).collect();
            Polygon::new(vertices, metadata.clone())
        })
        .collect()
}

/// The same unit-style cube as host buffers: 8 shared positions, 12 triangles,
/// one submesh, no attribute buffers (defaults get substituted).
pub fn cube_buffers(center: [Real; 3], half: Real) -> MeshBuffers {
    let [cx, cy, cz] = center;
    let mut buffers = MeshBuffers::default();
    for sz in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sx in [-1.0, 1.0] {
                buffers
                    .positions
                    .push(Point3::new(cx + sx * half, cy + sy * half, cz + sz * half));
            }
        }
    }

    // corner index = x + 2y + 4z over the sign grid above
    let quads: [[u32; 4]; 6] = [
        [0, 2, 3, 1], // -z
        [4, 5, 7, 6], // +z
        [0, 4, 6, 2], // -x
        [1, 3, 7, 5], // +x
        [0, 1, 5, 4], // -y
        [2, 6, 7, 3], // +y
    ];

    let mut indices = Vec::new();
    for quad in quads {
        indices.extend_from_slice(&[quad[0], quad[1], quad[2]]);
        indices.extend_from_slice(&[quad[0], quad[2], quad[3]]);
    }
    buffers.submeshes.push(indices);
    buffers
}

/// Signed enclosed volume via the divergence theorem; positive for outward
/// winding, negated by flipping the mesh inside out.
pub fn signed_volume<S: Clone>(mesh: &Mesh<S>) -> Real {
    mesh.triangulate()
        .polygons
        .iter()
        .map(|poly| {
            let a = poly.vertices[0].pos.coords;
            let b = poly.vertices[1].pos.coords;
            let c = poly.vertices[2].pos.coords;
            a.dot(&b.cross(&c)) / 6.0
        })
        .sum()
}

/// Signed enclosed volume of host buffers, all submeshes combined.
pub fn signed_volume_buffers(buffers: &MeshBuffers) -> Real {
    buffers
        .submeshes
        .iter()
        .flat_map(|indices| indices.chunks_exact(3))
        .map(|tri| {
            let a = buffers.positions[tri[0] as usize].coords;
            let b = buffers.positions[tri[1] as usize].coords;
            let c = buffers.positions[tri[2] as usize].coords;
            a.dot(&b.cross(&c)) / 6.0
        })
        .sum()
}
