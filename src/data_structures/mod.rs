//! Data the renderer draws: blocks, meshes and textures.
//!
//! - `block` is the block registry (ids, properties and atlas tiles)
//! - `mesh` holds vertex layouts, the built-in geometry and GPU vertex buffers
//! - `texture` contains the GPU texture wrapper and the generated block atlas

pub mod block;
pub mod mesh;
pub mod texture;
