//! **Constructive Solid Geometry (CSG)** on closed triangulated meshes, built
//! around Boolean operations (*union*, *intersection*, *subtraction*) on sets of
//! polygons stored in [BSP](mesh::bsp) trees.
//!
//! Two host meshes go in as plain vertex/index/submesh buffers plus a transform
//! into a common working space; one result mesh comes back out, re-triangulated
//! and grouped by the originating submesh (material) index.
//!
//! # Features
//! - **f64** (default): use f64 as Real
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod boolean;
pub mod errors;
pub mod float_types;
pub mod mesh;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use boolean::{BooleanConfig, BooleanOp};
pub use mesh::Mesh;
pub use mesh::buffers::MeshBuffers;
pub use mesh::vertex::Vertex;
