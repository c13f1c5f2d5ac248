//! Buffer-level boolean entry points: the surface the host editor calls

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use crate::mesh::buffers::MeshBuffers;
use nalgebra::Matrix4;

/// Which boolean operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Intersection,
    Union,
    Subtraction,
}

/// Per-call tuning. `epsilon` is the plane-classification tolerance threaded
/// through every split; any finite positive value is usable, including values
/// far below typical geometry scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BooleanConfig {
    pub epsilon: Real,
}

impl Default for BooleanConfig {
    fn default() -> Self {
        BooleanConfig { epsilon: EPSILON }
    }
}

/// Perform `op` on two host meshes and return the result as new buffers in
/// the common working space.
///
/// Each operand comes with its local-to-common-space transform. Fresh BSP
/// trees are built inside this call and consumed by it; nothing is cached
/// across calls. A structurally empty result (e.g. intersecting disjoint
/// solids) is returned as empty buffers, not an error.
///
/// ## Errors
/// Only from buffer validation or a non-invertible transform; see
/// [`ValidationError`].
pub fn boolean(
    op: BooleanOp,
    a: &MeshBuffers,
    a_to_common: &Matrix4<Real>,
    b: &MeshBuffers,
    b_to_common: &Matrix4<Real>,
    config: &BooleanConfig,
) -> Result<MeshBuffers, ValidationError> {
    let eps = config.epsilon;
    let mesh_a = Mesh::from_buffers(a, a_to_common, eps)?;
    let mesh_b = Mesh::from_buffers(b, b_to_common, eps)?;

    let result = match op {
        BooleanOp::Union => mesh_a.union(&mesh_b, eps),
        BooleanOp::Subtraction => mesh_a.difference(&mesh_b, eps),
        BooleanOp::Intersection => mesh_a.intersection(&mesh_b, eps),
    };

    Ok(result.to_buffers(eps))
}

/// Union of two host meshes. See [`boolean`].
pub fn union(
    a: &MeshBuffers,
    a_to_common: &Matrix4<Real>,
    b: &MeshBuffers,
    b_to_common: &Matrix4<Real>,
    config: &BooleanConfig,
) -> Result<MeshBuffers, ValidationError> {
    boolean(BooleanOp::Union, a, a_to_common, b, b_to_common, config)
}

/// `a - b` of two host meshes. See [`boolean`].
pub fn subtract(
    a: &MeshBuffers,
    a_to_common: &Matrix4<Real>,
    b: &MeshBuffers,
    b_to_common: &Matrix4<Real>,
    config: &BooleanConfig,
) -> Result<MeshBuffers, ValidationError> {
    boolean(BooleanOp::Subtraction, a, a_to_common, b, b_to_common, config)
}

/// Intersection of two host meshes. See [`boolean`].
pub fn intersect(
    a: &MeshBuffers,
    a_to_common: &Matrix4<Real>,
    b: &MeshBuffers,
    b_to_common: &Matrix4<Real>,
    config: &BooleanConfig,
) -> Result<MeshBuffers, ValidationError> {
    boolean(BooleanOp::Intersection, a, a_to_common, b, b_to_common, config)
}
