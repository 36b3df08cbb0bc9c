use strata_geom::{Colour4f, Orientation, Vec3};

use crate::mesh::{Mesh, Quad};
use crate::texture::SubTexture;

/// Quads built in a block's unrotated local frame (`[0, 1]^3`) before being placed in the world.
#[derive(Default, Clone, Debug)]
pub struct SubMesh {
    quads: Vec<Quad>,
}

impl SubMesh {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, colour: Colour4f, tex: &SubTexture) {
        self.quads.push(Quad::new(a, b, c, d, colour, tex));
    }

    #[inline]
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Rotates every quad by `orientation` about the block centre, translates it to block
    /// `(x, y, z)` and appends it to `mesh`. Returns how many quads were accepted.
    pub fn push_to(&self, mesh: &mut Mesh, x: i32, y: i32, z: i32, orientation: &Orientation) -> usize {
        let offset = Vec3::new(x as f32, y as f32, z as f32);
        self.quads
            .iter()
            .map(|q| q.map_corners(|p| orientation.apply(p) + offset))
            .filter(|q| mesh.add_quad(q))
            .count()
    }
}
