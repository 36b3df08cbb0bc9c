use serde::{Deserialize, Serialize};

use crate::raw::RawChunk;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// World-space block position of local `(0, 0, 0)`.
    #[inline]
    pub fn origin(self) -> (i32, i32, i32) {
        (self.cx * RawChunk::WIDTH as i32, 0, self.cz * RawChunk::DEPTH as i32)
    }

    /// Chunk containing world block `(wx, wz)` and the local offsets inside it.
    #[inline]
    pub fn containing(wx: i32, wz: i32) -> (Self, i32, i32) {
        let w = RawChunk::WIDTH as i32;
        let d = RawChunk::DEPTH as i32;
        (
            Self::new(wx.div_euclid(w), wz.div_euclid(d)),
            wx.rem_euclid(w),
            wz.rem_euclid(d),
        )
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}
