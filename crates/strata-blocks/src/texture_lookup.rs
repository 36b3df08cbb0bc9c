//! Name-to-texture resolution used when block types are registered.

use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::Deserialize;
use strata_mesh::{SubTexture, TextureId, TexturePackVersion};

use crate::error::RegistryError;

/// Texture source owned by the image loader; the registry only reads from it.
pub trait TextureLookup {
    /// Region of a named block texture.
    fn sub_texture(&self, name: &str) -> Option<SubTexture>;
    /// Whole texture page by name.
    fn texture(&self, name: &str) -> Option<TextureId>;
}

/// In-memory [`TextureLookup`].
#[derive(Clone, Debug, Default)]
pub struct TextureAtlas {
    pages: HashMap<String, TextureId>,
    regions: HashMap<String, SubTexture>,
}

impl TextureAtlas {
    /// Tiles per row and column of a legacy terrain atlas.
    pub const GRID: usize = 16;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, name: impl Into<String>, texture: TextureId) {
        self.pages.insert(name.into(), texture);
    }

    pub fn insert(&mut self, name: impl Into<String>, region: SubTexture) {
        self.regions.insert(name.into(), region);
    }

    /// Registers a whole-page modern texture under `name`.
    pub fn insert_page_texture(&mut self, name: impl Into<String>, texture: TextureId) {
        let name = name.into();
        self.regions.insert(
            name.clone(),
            SubTexture::new(texture, 0.0, 0.0, 1.0, 1.0, TexturePackVersion::Modern),
        );
        self.pages.insert(name, texture);
    }

    /// Names the tiles of a 16x16 legacy atlas in row-major order. `None` leaves a tile unnamed.
    pub fn from_grid<'a>(
        page_name: &str,
        texture: TextureId,
        tiles: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Self {
        let mut atlas = Self::new();
        atlas.add_page(page_name, texture);
        let step = 1.0 / Self::GRID as f32;
        for (i, name) in tiles.into_iter().enumerate().take(Self::GRID * Self::GRID) {
            let Some(name) = name else { continue };
            let col = (i % Self::GRID) as f32;
            let row = (i / Self::GRID) as f32;
            atlas.insert(
                name,
                SubTexture::new(
                    texture,
                    col * step,
                    row * step,
                    (col + 1.0) * step,
                    (row + 1.0) * step,
                    TexturePackVersion::Legacy,
                ),
            );
        }
        atlas
    }

    /// Builds an atlas from a texture index file. Pages get ids in file order.
    ///
    /// ```toml
    /// [[pages]]
    /// name = "terrain"
    /// version = "legacy"
    /// tiles = ["grass_top", "stone", "", "dirt"]
    ///
    /// [[pages]]
    /// name = "log_oak"
    /// version = "modern"
    /// ```
    ///
    /// A page without tiles is registered as one whole-page texture; empty tile names are skipped.
    pub fn from_toml_str(src: &str) -> Result<Self, RegistryError> {
        let cfg: AtlasConfig = toml::from_str(src)?;
        let mut atlas = Self::new();
        for (i, page) in cfg.pages.iter().enumerate() {
            let texture = TextureId(i as u32);
            let version = TexturePackVersion::from_name(&page.version).ok_or_else(|| {
                RegistryError::UnknownPackVersion {
                    page: page.name.clone(),
                    version: page.version.clone(),
                }
            })?;
            if page.tiles.is_empty() {
                atlas.add_page(page.name.as_str(), texture);
                atlas.insert(page.name.as_str(), SubTexture::new(texture, 0.0, 0.0, 1.0, 1.0, version));
                continue;
            }
            let tiles = page.tiles.iter().map(|t| (!t.is_empty()).then_some(t.as_str()));
            let grid = Self::from_grid(&page.name, texture, tiles);
            atlas.pages.extend(grid.pages);
            atlas.regions.extend(grid.regions.into_iter().map(|(name, mut region)| {
                region.pack_version = version;
                (name, region)
            }));
        }
        log::info!("texture atlas: {} pages, {} named textures", cfg.pages.len(), atlas.len());
        Ok(atlas)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl TextureLookup for TextureAtlas {
    fn sub_texture(&self, name: &str) -> Option<SubTexture> {
        self.regions.get(name).copied()
    }

    fn texture(&self, name: &str) -> Option<TextureId> {
        self.pages.get(name).copied()
    }
}

#[derive(Deserialize, Debug)]
struct AtlasConfig {
    #[serde(default)]
    pages: Vec<PageDef>,
}

#[derive(Deserialize, Debug)]
struct PageDef {
    name: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    tiles: Vec<String>,
}

fn default_version() -> String {
    "modern".to_string()
}
