use strata_chunk::LightFace;
use strata_geom::{Colour4f, Vec3};
use strata_mesh::{Geometry, MeshType, SubTexture};

use super::BlockType;
use crate::block_util::face_quad;
use crate::context::{BlockEnv, Lookup};

/// Surface height of a still water cell.
const SURFACE: f32 = 14.0 / 16.0;

/// Still or flowing water, drawn blended.
#[derive(Clone, Debug)]
pub struct Water {
    name: String,
    texture: SubTexture,
    tint: Colour4f,
}

impl Water {
    pub fn new(name: impl Into<String>, texture: SubTexture) -> Self {
        Self {
            name: name.into(),
            texture,
            tint: Colour4f::WHITE,
        }
    }

    pub fn with_tint(mut self, tint: Colour4f) -> Self {
        self.tint = tint;
        self
    }

    fn add_faces(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, lookup: Lookup, geometry: &mut Geometry) {
        let mesh = geometry.get_mesh(self.texture.texture, MeshType::Transparent);
        // A column of water fills its cells; only the topmost cell sits lower.
        let full = env.block_type(lookup, x, y + 1, z).is_water();
        let surface = y as f32 + SURFACE;
        let cap = |p: Vec3| if !full && p.y > surface { Vec3::new(p.x, surface, p.z) } else { p };

        for face in LightFace::ALL {
            let (dx, dy, dz) = face.delta();
            let neighbour = env.block_type(lookup, x + dx, y + dy, z + dz);
            let visible = match face {
                LightFace::Top => !neighbour.is_water(),
                _ => !neighbour.is_solid() && !neighbour.is_water(),
            };
            if visible {
                let quad = face_quad(env, lookup, face, x, y, z, self.tint, &self.texture).map_corners(cap);
                mesh.add_quad(&quad);
            }
        }
    }
}

impl BlockType for Water {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_solid(&self) -> bool {
        false
    }

    fn is_water(&self) -> bool {
        true
    }

    fn add_interior_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        self.add_faces(x, y, z, env, Lookup::Interior, geometry);
    }

    fn add_edge_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        self.add_faces(x, y, z, env, Lookup::Edge, geometry);
    }
}
