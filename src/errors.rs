//! Validation errors

/// All the possible validation issues we might encounter while converting host
/// mesh buffers into a polygon soup.
///
/// The geometric core itself never fails: degenerate geometry is dropped during
/// soup construction and an empty boolean result is a valid outcome, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An index buffer references a vertex past the end of the position buffer
    #[error("index {index} in submesh {submesh} is out of range (positions.len = {len})")]
    IndexOutOfBounds {
        submesh: usize,
        index: u32,
        len: usize,
    },
    /// An attribute buffer is neither empty nor the same length as the position buffer
    #[error("{buffer} buffer has {len} entries but there are {expected} positions")]
    AttributeLengthMismatch {
        buffer: &'static str,
        len: usize,
        expected: usize,
    },
    /// A submesh index buffer does not describe whole triangles
    #[error("submesh {submesh} has {len} indices, which is not a multiple of 3")]
    PartialTriangle { submesh: usize, len: usize },
    /// The local-to-common-space transform cannot be inverted for normals
    #[error("mesh transform is not invertible")]
    NonInvertibleTransform,
}
