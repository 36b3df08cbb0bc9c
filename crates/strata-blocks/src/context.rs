use hashbrown::HashMap;
use strata_chunk::{AIR, BlockId, ChunkCoord, LightFace, LightStyle, MAX_LIGHT, RawChunk};

use crate::registry::BlockTypeRegistry;
use crate::types::BlockKind;

/// World access for a render pass. Coordinates are local to `chunk` and may step outside it.
pub trait BlockContext: Sync {
    fn light_style(&self) -> LightStyle;

    fn block_id(&self, chunk: &RawChunk, x: i32, y: i32, z: i32) -> BlockId;

    fn block_data(&self, chunk: &RawChunk, x: i32, y: i32, z: i32) -> u8;

    /// Shaded light of the cell at `(x, y, z)` for a face looking out through it.
    fn light(&self, chunk: &RawChunk, face: LightFace, x: i32, y: i32, z: i32) -> f32;
}

/// Context that sees only the chunk being rendered; everything outside it is open air.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkContext {
    pub style: LightStyle,
}

impl ChunkContext {
    pub const fn new(style: LightStyle) -> Self {
        Self { style }
    }
}

impl BlockContext for ChunkContext {
    fn light_style(&self) -> LightStyle {
        self.style
    }

    fn block_id(&self, chunk: &RawChunk, x: i32, y: i32, z: i32) -> BlockId {
        chunk.block_id(x, y, z)
    }

    fn block_data(&self, chunk: &RawChunk, x: i32, y: i32, z: i32) -> u8 {
        chunk.block_data(x, y, z)
    }

    fn light(&self, chunk: &RawChunk, face: LightFace, x: i32, y: i32, z: i32) -> f32 {
        if RawChunk::contains(x, y, z) || y < 0 || y >= RawChunk::HEIGHT as i32 {
            chunk.light(self.style, face, x, y, z)
        } else {
            self.style.lightness(MAX_LIGHT, 0) * face.shade()
        }
    }
}

/// Context over a set of loaded chunks; lookups follow coordinates into neighbouring chunks.
#[derive(Clone, Copy, Debug)]
pub struct WorldContext<'a> {
    pub style: LightStyle,
    pub chunks: &'a HashMap<ChunkCoord, RawChunk>,
}

impl<'a> WorldContext<'a> {
    pub fn new(style: LightStyle, chunks: &'a HashMap<ChunkCoord, RawChunk>) -> Self {
        Self { style, chunks }
    }

    // Chunk holding local (x, z) of `chunk` plus the coordinates inside it.
    fn resolve<'c>(&'c self, chunk: &'c RawChunk, x: i32, z: i32) -> Option<(&'c RawChunk, i32, i32)> {
        if (0..RawChunk::WIDTH as i32).contains(&x) && (0..RawChunk::DEPTH as i32).contains(&z) {
            return Some((chunk, x, z));
        }
        let (ox, _, oz) = chunk.coord.origin();
        let (coord, lx, lz) = ChunkCoord::containing(ox + x, oz + z);
        self.chunks.get(&coord).map(|c| (c, lx, lz))
    }
}

impl BlockContext for WorldContext<'_> {
    fn light_style(&self) -> LightStyle {
        self.style
    }

    fn block_id(&self, chunk: &RawChunk, x: i32, y: i32, z: i32) -> BlockId {
        self.resolve(chunk, x, z).map_or(AIR, |(c, lx, lz)| c.block_id(lx, y, lz))
    }

    fn block_data(&self, chunk: &RawChunk, x: i32, y: i32, z: i32) -> u8 {
        self.resolve(chunk, x, z).map_or(0, |(c, lx, lz)| c.block_data(lx, y, lz))
    }

    fn light(&self, chunk: &RawChunk, face: LightFace, x: i32, y: i32, z: i32) -> f32 {
        match self.resolve(chunk, x, z) {
            Some((c, lx, lz)) => c.light(self.style, face, lx, y, lz),
            None => self.style.lightness(MAX_LIGHT, 0) * face.shade(),
        }
    }
}

/// How a generator resolves a neighbouring cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lookup {
    /// Read the raw chunk directly; the block is known not to touch a chunk border.
    Interior,
    /// Go through the [`BlockContext`], which may cross into neighbouring chunks.
    Edge,
}

/// Everything a block generator reads during a chunk's render pass.
#[derive(Clone, Copy)]
pub struct BlockEnv<'a> {
    pub context: &'a dyn BlockContext,
    pub registry: &'a BlockTypeRegistry,
    pub chunk: &'a RawChunk,
}

impl<'a> BlockEnv<'a> {
    pub fn new(context: &'a dyn BlockContext, registry: &'a BlockTypeRegistry, chunk: &'a RawChunk) -> Self {
        Self {
            context,
            registry,
            chunk,
        }
    }

    #[inline]
    pub fn light_style(&self) -> LightStyle {
        self.context.light_style()
    }

    /// Block type of the cell at `(x, y, z)`.
    pub fn block_type(&self, lookup: Lookup, x: i32, y: i32, z: i32) -> &'a BlockKind {
        let (id, data) = match lookup {
            Lookup::Interior => (self.chunk.block_id(x, y, z), self.chunk.block_data(x, y, z)),
            Lookup::Edge => (
                self.context.block_id(self.chunk, x, y, z),
                self.context.block_data(self.chunk, x, y, z),
            ),
        };
        self.registry.find(id, data)
    }

    /// Light of the cell at `(x, y, z)` as seen through `face`.
    pub fn light(&self, lookup: Lookup, face: LightFace, x: i32, y: i32, z: i32) -> f32 {
        match lookup {
            Lookup::Interior => self.chunk.light(self.light_style(), face, x, y, z),
            Lookup::Edge => self.context.light(self.chunk, face, x, y, z),
        }
    }
}
