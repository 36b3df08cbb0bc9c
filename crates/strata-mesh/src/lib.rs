//! Rasteriser-facing mesh buffers, sub-textures and the per-chunk mesh pool.
#![forbid(unsafe_code)]

mod constants;
pub mod geometry;
pub mod mesh;
pub mod sub_mesh;
pub mod texture;

pub use geometry::{Geometry, MeshType};
pub use mesh::{Mesh, Quad};
pub use sub_mesh::SubMesh;
pub use texture::{SubTexture, TextureId, TexturePackVersion};
