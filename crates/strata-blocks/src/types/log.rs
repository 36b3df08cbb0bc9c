use strata_geom::Colour4f;
use strata_mesh::{Geometry, MeshType, SubTexture};

use super::BlockType;
use crate::block_util::{
    add_bottom, add_east, add_interior_east, add_interior_north, add_interior_south, add_interior_top,
    add_interior_west, add_north, add_south, add_top, add_west,
};
use crate::context::BlockEnv;

/// Tree trunk: bark on the sides, rings on the top and bottom.
#[derive(Clone, Debug)]
pub struct Log {
    name: String,
    side: SubTexture,
    top: SubTexture,
    tint: Colour4f,
}

impl Log {
    /// Both textures are required; the registry reports a missing one before a `Log` is built.
    pub fn new(name: impl Into<String>, side: SubTexture, top: SubTexture) -> Self {
        Self {
            name: name.into(),
            side,
            top,
            tint: Colour4f::WHITE,
        }
    }

    pub fn with_tint(mut self, tint: Colour4f) -> Self {
        self.tint = tint;
        self
    }
}

impl BlockType for Log {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_solid(&self) -> bool {
        true
    }

    fn is_water(&self) -> bool {
        false
    }

    fn add_interior_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        add_interior_top(
            env,
            x,
            y,
            z,
            self.tint,
            &self.top,
            geometry.get_mesh(self.top.texture, MeshType::Solid),
        );

        let side = geometry.get_mesh(self.side.texture, MeshType::Solid);
        add_interior_north(env, x, y, z, self.tint, &self.side, side);
        add_interior_south(env, x, y, z, self.tint, &self.side, side);
        add_interior_east(env, x, y, z, self.tint, &self.side, side);
        add_interior_west(env, x, y, z, self.tint, &self.side, side);
    }

    fn add_edge_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        let mesh = geometry.base_mesh();

        add_top(env, x, y, z, self.tint, &self.top, mesh);
        add_bottom(env, x, y, z, self.tint, &self.top, mesh);

        add_north(env, x, y, z, self.tint, &self.side, mesh);
        add_south(env, x, y, z, self.tint, &self.side, mesh);
        add_east(env, x, y, z, self.tint, &self.side, mesh);
        add_west(env, x, y, z, self.tint, &self.side, mesh);
    }
}
