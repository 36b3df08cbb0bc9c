//! Block types, per-face mesh builders and the chunk render pass.
#![forbid(unsafe_code)]

pub mod block_util;
pub mod config;
pub mod context;
pub mod error;
pub mod registry;
pub mod render;
pub mod texture_lookup;
pub mod types;

pub use context::{BlockContext, BlockEnv, ChunkContext, Lookup, WorldContext};
pub use error::RegistryError;
pub use registry::BlockTypeRegistry;
pub use render::{ChunkRenderStats, render_chunk};
pub use texture_lookup::{TextureAtlas, TextureLookup};
pub use types::{Air, BlockKind, BlockType, Log, PistonBase, PistonFacing, PistonParts, PistonState, Solid, Water};
