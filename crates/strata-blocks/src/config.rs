//! Serde model of the block registry file.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct BlocksConfig {
    /// Texture page backing each geometry pool's base mesh.
    pub base_texture: String,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

/// Block kinds a definition may name. Kept as a string in [`BlockDef`] so unknown kinds
/// surface as a registry error naming the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKindCfg {
    Air,
    Solid,
    Log,
    PistonBase,
    Water,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub id: u16,
    /// Registers a data-specific override instead of the id-wide entry.
    #[serde(default)]
    pub data: Option<u8>,
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Fallback for every face slot.
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub bottom: Option<String>,
    #[serde(default)]
    pub face: Option<String>,
    /// RGB or RGBA multiplier in `[0, 1]`.
    #[serde(default)]
    pub tint: Option<Vec<f32>>,
    #[serde(default)]
    pub alpha_test: bool,
}

impl BlockDef {
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| format!("block {}", self.id))
    }

    /// Texture name for `slot`, falling back to `texture`.
    pub fn slot(&self, slot: &str) -> Option<&str> {
        let named = match slot {
            "top" => self.top.as_deref(),
            "side" => self.side.as_deref(),
            "bottom" => self.bottom.as_deref(),
            "face" => self.face.as_deref(),
            _ => None,
        };
        named.or(self.texture.as_deref())
    }
}

impl BlockKindCfg {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "air" => Some(BlockKindCfg::Air),
            "solid" => Some(BlockKindCfg::Solid),
            "log" => Some(BlockKindCfg::Log),
            "piston_base" => Some(BlockKindCfg::PistonBase),
            "water" => Some(BlockKindCfg::Water),
            _ => None,
        }
    }
}
