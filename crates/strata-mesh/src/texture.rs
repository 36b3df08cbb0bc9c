use serde::Deserialize;

/// Handle to a texture page owned by the rasteriser.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Texture pack layout a [`SubTexture`] was sliced from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TexturePackVersion {
    /// Single 256px terrain atlas of 16x16 tiles (packs up to 1.4).
    Legacy,
    /// One 16px texture per block face (1.5 onwards).
    #[default]
    Modern,
}

impl TexturePackVersion {
    /// Side of the texture page in texels.
    #[inline]
    pub fn page_texels(self) -> f32 {
        match self {
            TexturePackVersion::Legacy => 16.0 * 16.0,
            TexturePackVersion::Modern => 16.0,
        }
    }

    /// UV span covered by `texels` texels of a 16px block texture in this layout.
    #[inline]
    pub fn texel_span(self, texels: f32) -> f32 {
        texels / self.page_texels()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "legacy" | "1.4" => Some(TexturePackVersion::Legacy),
            "modern" | "1.5" => Some(TexturePackVersion::Modern),
            _ => None,
        }
    }
}

/// Rectangle `(u0, v0)..(u1, v1)` of a texture page.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SubTexture {
    pub texture: TextureId,
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
    pub pack_version: TexturePackVersion,
}

impl SubTexture {
    #[inline]
    pub const fn new(
        texture: TextureId,
        u0: f32,
        v0: f32,
        u1: f32,
        v1: f32,
        pack_version: TexturePackVersion,
    ) -> Self {
        Self {
            texture,
            u0,
            v0,
            u1,
            v1,
            pack_version,
        }
    }

    /// Same page and version, different rectangle.
    #[inline]
    pub fn with_v(&self, v0: f32, v1: f32) -> Self {
        Self { v0, v1, ..*self }
    }

    /// Splits off a strip `texels` high from the top (`v0`) edge.
    ///
    /// Returns `(rest, strip)`. The strip covers `[v0, split]` and the rest `[split, v1]`, so the
    /// two tile the input exactly; `split` never passes `v1`.
    pub fn slice_top(&self, texels: f32) -> (SubTexture, SubTexture) {
        let split = (self.v0 + self.pack_version.texel_span(texels)).min(self.v1);
        (self.with_v(split, self.v1), self.with_v(self.v0, split))
    }

    /// UVs for quad corners `a, b, c, d`.
    #[inline]
    pub fn corner_uvs(&self) -> [(f32, f32); 4] {
        [
            (self.u0, self.v0),
            (self.u1, self.v0),
            (self.u1, self.v1),
            (self.u0, self.v1),
        ]
    }
}
