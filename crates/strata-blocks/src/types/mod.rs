//! Block types and their geometry generators.

mod air;
mod log;
mod piston_base;
mod solid;
mod water;

pub use air::Air;
pub use self::log::Log;
pub use piston_base::{PistonBase, PistonFacing, PistonParts, PistonState};
pub use solid::Solid;
pub use water::Water;

use strata_mesh::Geometry;

use crate::context::BlockEnv;

/// Capabilities every block type provides to the render pass.
pub trait BlockType {
    fn name(&self) -> &str;

    /// Solid blocks hide the faces of their neighbours.
    fn is_solid(&self) -> bool;

    fn is_water(&self) -> bool;

    /// Geometry for a cell whose neighbours all lie in the same chunk.
    fn add_interior_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry);

    /// Geometry for a cell on the chunk border; neighbours are resolved through the block context.
    fn add_edge_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry);
}

/// Closed set of block types held by the registry.
#[derive(Clone, Debug)]
pub enum BlockKind {
    Air(Air),
    Solid(Solid),
    Log(Log),
    PistonBase(PistonBase),
    Water(Water),
}

impl Default for BlockKind {
    fn default() -> Self {
        BlockKind::Air(Air::default())
    }
}

impl BlockKind {
    #[inline]
    pub fn is_air(&self) -> bool {
        matches!(self, BlockKind::Air(_))
    }
}

macro_rules! dispatch {
    ($self:ident, $b:ident => $e:expr) => {
        match $self {
            BlockKind::Air($b) => $e,
            BlockKind::Solid($b) => $e,
            BlockKind::Log($b) => $e,
            BlockKind::PistonBase($b) => $e,
            BlockKind::Water($b) => $e,
        }
    };
}

impl BlockType for BlockKind {
    #[inline]
    fn name(&self) -> &str {
        dispatch!(self, b => b.name())
    }

    #[inline]
    fn is_solid(&self) -> bool {
        dispatch!(self, b => b.is_solid())
    }

    #[inline]
    fn is_water(&self) -> bool {
        dispatch!(self, b => b.is_water())
    }

    #[inline]
    fn add_interior_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        dispatch!(self, b => b.add_interior_geometry(x, y, z, env, geometry))
    }

    #[inline]
    fn add_edge_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        dispatch!(self, b => b.add_edge_geometry(x, y, z, env, geometry))
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for BlockKind {
                fn from(b: $variant) -> Self {
                    BlockKind::$variant(b)
                }
            }
        )*
    };
}

impl_from!(Air, Solid, Log, PistonBase, Water);
