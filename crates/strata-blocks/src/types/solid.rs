use strata_chunk::LightFace;
use strata_geom::Colour4f;
use strata_mesh::{Geometry, MeshType, SubTexture};

use super::BlockType;
use crate::block_util::add_face;
use crate::context::{BlockEnv, Lookup};

/// Full cube with separate top, side and bottom textures.
#[derive(Clone, Debug)]
pub struct Solid {
    name: String,
    top: SubTexture,
    side: SubTexture,
    bottom: SubTexture,
    tint: Colour4f,
    alpha_test: bool,
}

impl Solid {
    pub fn new(name: impl Into<String>, top: SubTexture, side: SubTexture, bottom: SubTexture) -> Self {
        Self {
            name: name.into(),
            top,
            side,
            bottom,
            tint: Colour4f::WHITE,
            alpha_test: false,
        }
    }

    /// Same texture on all six faces.
    pub fn uniform(name: impl Into<String>, texture: SubTexture) -> Self {
        Self::new(name, texture, texture, texture)
    }

    pub fn with_tint(mut self, tint: Colour4f) -> Self {
        self.tint = tint;
        self
    }

    /// Cut-out blocks (leaves, glass) are drawn with alpha testing and do not hide neighbours.
    pub fn with_alpha_test(mut self, alpha_test: bool) -> Self {
        self.alpha_test = alpha_test;
        self
    }

    #[inline]
    fn mesh_type(&self) -> MeshType {
        if self.alpha_test { MeshType::AlphaTest } else { MeshType::Solid }
    }

    fn texture_for(&self, face: LightFace) -> &SubTexture {
        match face {
            LightFace::Top => &self.top,
            LightFace::Bottom => &self.bottom,
            _ => &self.side,
        }
    }

    fn add_faces(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, lookup: Lookup, geometry: &mut Geometry) {
        let ty = self.mesh_type();
        for face in LightFace::ALL {
            let tex = self.texture_for(face);
            add_face(env, lookup, face, x, y, z, self.tint, tex, geometry.get_mesh(tex.texture, ty));
        }
    }
}

impl BlockType for Solid {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_solid(&self) -> bool {
        !self.alpha_test
    }

    fn is_water(&self) -> bool {
        false
    }

    fn add_interior_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        self.add_faces(x, y, z, env, Lookup::Interior, geometry);
    }

    fn add_edge_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        self.add_faces(x, y, z, env, Lookup::Edge, geometry);
    }
}
