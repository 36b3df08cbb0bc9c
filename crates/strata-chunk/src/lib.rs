//! Raw chunk storage and light sampling for the map mesher.
#![forbid(unsafe_code)]

mod coord;
pub mod light;
mod raw;

pub use coord::ChunkCoord;
pub use light::{LightFace, LightStyle, MAX_LIGHT};
pub use raw::{AIR, BlockId, RawChunk};
