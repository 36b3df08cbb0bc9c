use crate::coord::ChunkCoord;
use crate::light::{LightFace, LightStyle, MAX_LIGHT};

pub type BlockId = u16;

pub const AIR: BlockId = 0;

const NIBBLE: u8 = 0x0F;

/// Fixed-size voxel column: block ids, 4-bit block data and 4-bit sky/block light per cell.
///
/// Reads take signed local coordinates and never panic: anything outside the column reads as
/// air with data 0, no block light, and full sky light above the top (none elsewhere).
#[derive(Clone, Debug)]
pub struct RawChunk {
    pub coord: ChunkCoord,
    blocks: Vec<BlockId>,
    data: Vec<u8>,
    sky_light: Vec<u8>,
    block_light: Vec<u8>,
}

impl RawChunk {
    pub const WIDTH: usize = 16;
    pub const HEIGHT: usize = 128;
    pub const DEPTH: usize = 16;
    pub const VOLUME: usize = Self::WIDTH * Self::HEIGHT * Self::DEPTH;

    /// An all-air chunk under open sky.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![AIR; Self::VOLUME],
            data: vec![0; Self::VOLUME],
            sky_light: vec![MAX_LIGHT; Self::VOLUME],
            block_light: vec![0; Self::VOLUME],
        }
    }

    /// Linear index of a local cell, or `None` when outside the column.
    #[inline]
    pub fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if x < 0
            || y < 0
            || z < 0
            || x >= Self::WIDTH as i32
            || y >= Self::HEIGHT as i32
            || z >= Self::DEPTH as i32
        {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        Some((y * Self::DEPTH + z) * Self::WIDTH + x)
    }

    #[inline]
    pub fn contains(x: i32, y: i32, z: i32) -> bool {
        Self::index(x, y, z).is_some()
    }

    /// True for cells on the chunk's horizontal border, whose neighbours live in other chunks.
    #[inline]
    pub fn is_edge(x: i32, z: i32) -> bool {
        x == 0 || z == 0 || x == Self::WIDTH as i32 - 1 || z == Self::DEPTH as i32 - 1
    }

    #[inline]
    pub fn block_id(&self, x: i32, y: i32, z: i32) -> BlockId {
        Self::index(x, y, z).map_or(AIR, |i| self.blocks[i])
    }

    #[inline]
    pub fn block_data(&self, x: i32, y: i32, z: i32) -> u8 {
        Self::index(x, y, z).map_or(0, |i| self.data[i])
    }

    #[inline]
    pub fn sky_light(&self, x: i32, y: i32, z: i32) -> u8 {
        match Self::index(x, y, z) {
            Some(i) => self.sky_light[i],
            None if y >= Self::HEIGHT as i32 => MAX_LIGHT,
            None => 0,
        }
    }

    #[inline]
    pub fn block_light(&self, x: i32, y: i32, z: i32) -> u8 {
        Self::index(x, y, z).map_or(0, |i| self.block_light[i])
    }

    /// Light of the cell at `(x, y, z)` under `style`, shaded for a face looking out through it.
    #[inline]
    pub fn light(&self, style: LightStyle, face: LightFace, x: i32, y: i32, z: i32) -> f32 {
        style.lightness(self.sky_light(x, y, z), self.block_light(x, y, z)) * face.shade()
    }

    /// Sets id and data in one go. Out-of-range writes are ignored.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: BlockId, data: u8) {
        if let Some(i) = Self::index(x, y, z) {
            self.blocks[i] = id;
            self.data[i] = data & NIBBLE;
        }
    }

    pub fn set_block_data(&mut self, x: i32, y: i32, z: i32, data: u8) {
        if let Some(i) = Self::index(x, y, z) {
            self.data[i] = data & NIBBLE;
        }
    }

    pub fn set_sky_light(&mut self, x: i32, y: i32, z: i32, level: u8) {
        if let Some(i) = Self::index(x, y, z) {
            self.sky_light[i] = level & NIBBLE;
        }
    }

    pub fn set_block_light(&mut self, x: i32, y: i32, z: i32, level: u8) {
        if let Some(i) = Self::index(x, y, z) {
            self.block_light[i] = level & NIBBLE;
        }
    }

    /// Darkens sky light below the first non-air block of every column.
    ///
    /// A coarse stand-in for saved light data when a chunk is built in memory.
    pub fn settle_sky_light(&mut self) {
        for z in 0..Self::DEPTH as i32 {
            for x in 0..Self::WIDTH as i32 {
                let mut open = true;
                for y in (0..Self::HEIGHT as i32).rev() {
                    if self.block_id(x, y, z) != AIR {
                        open = false;
                    }
                    self.set_sky_light(x, y, z, if open { MAX_LIGHT } else { 0 });
                }
            }
        }
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|&b| b == AIR)
    }
}
