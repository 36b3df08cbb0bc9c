use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use strata_chunk::BlockId;
use strata_geom::Colour4f;
use strata_mesh::{SubTexture, TextureId};

use crate::config::{BlockDef, BlockKindCfg, BlocksConfig};
use crate::error::RegistryError;
use crate::texture_lookup::TextureLookup;
use crate::types::{Air, BlockKind, Log, PistonBase, Solid, Water};

/// Block types by id, with optional per-data overrides.
///
/// Lookups never fail: ids with no registered type resolve to air.
#[derive(Clone, Debug)]
pub struct BlockTypeRegistry {
    base_texture: TextureId,
    by_id: Vec<BlockKind>,
    by_data: HashMap<(BlockId, u8), BlockKind>,
    air: BlockKind,
}

impl BlockTypeRegistry {
    pub fn new(base_texture: TextureId) -> Self {
        Self {
            base_texture,
            by_id: Vec::new(),
            by_data: HashMap::new(),
            air: BlockKind::default(),
        }
    }

    #[inline]
    pub fn base_texture(&self) -> TextureId {
        self.base_texture
    }

    /// Registers `kind` for every data value of `id`, replacing any previous entry.
    pub fn register(&mut self, id: BlockId, kind: impl Into<BlockKind>) {
        let ix = id as usize;
        if self.by_id.len() <= ix {
            self.by_id.resize_with(ix + 1, BlockKind::default);
        }
        self.by_id[ix] = kind.into();
    }

    /// Registers `kind` for one `(id, data)` pair; it wins over the id-wide entry.
    pub fn register_data(&mut self, id: BlockId, data: u8, kind: impl Into<BlockKind>) {
        self.by_data.insert((id, data), kind.into());
    }

    /// Type of a block with the given id and data.
    #[inline]
    pub fn find(&self, id: BlockId, data: u8) -> &BlockKind {
        if let Some(kind) = self.by_data.get(&(id, data)) {
            return kind;
        }
        self.by_id.get(id as usize).unwrap_or(&self.air)
    }

    /// Number of ids with a non-air entry, plus data overrides.
    pub fn len(&self) -> usize {
        self.by_id.iter().filter(|k| !k.is_air()).count() + self.by_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a registry from a parsed config, resolving every texture through `textures`.
    pub fn from_config(cfg: &BlocksConfig, textures: &impl TextureLookup) -> Result<Self, RegistryError> {
        let base = textures
            .texture(&cfg.base_texture)
            .ok_or_else(|| RegistryError::MissingBaseTexture(cfg.base_texture.clone()))?;
        let mut reg = Self::new(base);
        for def in &cfg.blocks {
            let kind = build_kind(def, textures)?;
            match def.data {
                Some(data) if data > 0xF => {
                    return Err(RegistryError::DataOutOfRange {
                        block: def.display_name(),
                        data,
                    });
                }
                Some(data) => reg.register_data(def.id, data, kind),
                None => reg.register(def.id, kind),
            }
        }
        log::info!(
            "block registry: {} types ({} data overrides)",
            reg.len(),
            reg.by_data.len()
        );
        Ok(reg)
    }

    pub fn from_toml_str(src: &str, textures: &impl TextureLookup) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(src)?;
        Self::from_config(&cfg, textures)
    }

    pub fn from_path(path: impl AsRef<Path>, textures: &impl TextureLookup) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src, textures)
    }
}

fn resolve(def: &BlockDef, slot: &'static str, textures: &impl TextureLookup) -> Result<SubTexture, RegistryError> {
    let name = def.slot(slot).ok_or_else(|| RegistryError::UnnamedTexture {
        block: def.display_name(),
        slot,
    })?;
    textures
        .sub_texture(name)
        .ok_or_else(|| RegistryError::MissingTexture {
            block: def.display_name(),
            slot,
            texture: name.to_string(),
        })
}

fn tint(def: &BlockDef) -> Colour4f {
    match def.tint.as_deref() {
        None => Colour4f::WHITE,
        Some(&[r, g, b]) => Colour4f::new(r, g, b, 1.0),
        Some(&[r, g, b, a]) => Colour4f::new(r, g, b, a),
        Some(other) => {
            log::warn!(
                "block `{}`: tint needs 3 or 4 components, got {}; using white",
                def.display_name(),
                other.len()
            );
            Colour4f::WHITE
        }
    }
}

fn build_kind(def: &BlockDef, textures: &impl TextureLookup) -> Result<BlockKind, RegistryError> {
    let name = def.display_name();
    let kind = BlockKindCfg::from_name(&def.kind).ok_or_else(|| RegistryError::UnknownKind {
        block: name.clone(),
        kind: def.kind.clone(),
    })?;
    Ok(match kind {
        BlockKindCfg::Air => Air::new(name).into(),
        BlockKindCfg::Solid => Solid::new(
            name,
            resolve(def, "top", textures)?,
            resolve(def, "side", textures)?,
            resolve(def, "bottom", textures)?,
        )
        .with_tint(tint(def))
        .with_alpha_test(def.alpha_test)
        .into(),
        BlockKindCfg::Log => Log::new(name, resolve(def, "side", textures)?, resolve(def, "top", textures)?)
            .with_tint(tint(def))
            .into(),
        BlockKindCfg::PistonBase => PistonBase::new(
            name,
            resolve(def, "side", textures)?,
            resolve(def, "top", textures)?,
            resolve(def, "bottom", textures)?,
            resolve(def, "face", textures)?,
        )
        .into(),
        BlockKindCfg::Water => Water::new(name, resolve(def, "texture", textures)?)
            .with_tint(tint(def))
            .into(),
    })
}
