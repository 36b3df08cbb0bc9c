use strata_chunk::LightFace;
use strata_geom::{Colour4f, Orientation, Rotation, Turn, Vec3};
use strata_mesh::{Geometry, MeshType, SubMesh, SubTexture};

use super::BlockType;
use crate::context::{BlockEnv, Lookup};

const EXTENDED_BIT: u8 = 0x8;
const FACING_MASK: u8 = 0x7;
/// Height of the base below the head plate.
const BASE_HEIGHT: f32 = 12.0 / 16.0;
/// Texels of the side texture that belong to the head plate.
const EDGE_TEXELS: f32 = 4.0;

/// Direction the piston head points.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PistonFacing {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl PistonFacing {
    pub const ALL: [PistonFacing; 6] = [
        PistonFacing::Down,
        PistonFacing::Up,
        PistonFacing::North,
        PistonFacing::South,
        PistonFacing::West,
        PistonFacing::East,
    ];

    /// Decodes the low three data bits. Codes 6 and 7 are unused and read as `Up`.
    #[inline]
    pub fn from_data(data: u8) -> Self {
        match data & FACING_MASK {
            0 => PistonFacing::Down,
            1 => PistonFacing::Up,
            2 => PistonFacing::North,
            3 => PistonFacing::South,
            4 => PistonFacing::West,
            5 => PistonFacing::East,
            _ => PistonFacing::Up,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        match self {
            PistonFacing::Down => 0,
            PistonFacing::Up => 1,
            PistonFacing::North => 2,
            PistonFacing::South => 3,
            PistonFacing::West => 4,
            PistonFacing::East => 5,
        }
    }

    /// Turns taking the upright model to this facing.
    pub fn orientation(self) -> Orientation {
        use Rotation::{AntiClockwise, Clockwise};
        let (vertical, horizontal) = match self {
            PistonFacing::Down => (Turn::new(Clockwise, 180.0), Turn::new(Clockwise, 0.0)),
            PistonFacing::Up => (Turn::NONE, Turn::new(Clockwise, 0.0)),
            PistonFacing::North => (Turn::new(Clockwise, 90.0), Turn::new(AntiClockwise, 90.0)),
            PistonFacing::South => (Turn::new(Clockwise, 90.0), Turn::new(Clockwise, 90.0)),
            PistonFacing::West => (Turn::new(Clockwise, 90.0), Turn::new(Clockwise, 0.0)),
            PistonFacing::East => (Turn::new(Clockwise, 90.0), Turn::new(Clockwise, 180.0)),
        };
        Orientation::new(vertical, horizontal)
    }
}

/// Decoded piston block data. Recomputed on every render.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PistonState {
    pub facing: PistonFacing,
    pub extended: bool,
}

impl PistonState {
    #[inline]
    pub fn from_data(data: u8) -> Self {
        Self {
            facing: PistonFacing::from_data(data),
            extended: data & EXTENDED_BIT != 0,
        }
    }
}

/// Piston model in the upright local frame, one sub-mesh per texture.
#[derive(Clone, Debug, Default)]
pub struct PistonParts {
    /// Four sides of the base.
    pub base: SubMesh,
    /// Four side strips of the head plate; empty while extended.
    pub edges: SubMesh,
    pub top: SubMesh,
    pub bottom: SubMesh,
    /// Head plate face, only while retracted.
    pub face: Option<SubMesh>,
}

impl PistonParts {
    pub fn quad_count(&self) -> usize {
        self.base.len()
            + self.edges.len()
            + self.top.len()
            + self.bottom.len()
            + self.face.as_ref().map_or(0, SubMesh::len)
    }
}

/// Piston (and sticky piston) body.
#[derive(Clone, Debug)]
pub struct PistonBase {
    name: String,
    base_side: SubTexture,
    edge: SubTexture,
    top: SubTexture,
    bottom: SubTexture,
    face: SubTexture,
}

impl PistonBase {
    /// Splits `side` into the base side and the head-plate strip, sized for its pack version.
    pub fn new(
        name: impl Into<String>,
        side: SubTexture,
        top: SubTexture,
        bottom: SubTexture,
        face: SubTexture,
    ) -> Self {
        let (base_side, edge) = side.slice_top(EDGE_TEXELS);
        Self {
            name: name.into(),
            base_side,
            edge,
            top,
            bottom,
            face,
        }
    }

    pub fn base_side(&self) -> &SubTexture {
        &self.base_side
    }

    pub fn edge(&self) -> &SubTexture {
        &self.edge
    }

    /// Builds the upright model with a flat `colour` on every vertex.
    pub fn parts(&self, extended: bool, colour: Colour4f) -> PistonParts {
        let v = Vec3::new;
        let h = BASE_HEIGHT;

        let mut top = SubMesh::new();
        top.add_quad(v(0.0, h, 0.0), v(1.0, h, 0.0), v(1.0, h, 1.0), v(0.0, h, 1.0), colour, &self.top);

        let mut bottom = SubMesh::new();
        bottom.add_quad(v(0.0, 0.0, 0.0), v(0.0, 0.0, 1.0), v(1.0, 0.0, 1.0), v(1.0, 0.0, 0.0), colour, &self.bottom);

        let mut base = SubMesh::new();
        add_sides(&mut base, 0.0, h, colour, &self.base_side);

        let mut edges = SubMesh::new();
        let face = if extended {
            None
        } else {
            let mut face = SubMesh::new();
            face.add_quad(v(0.0, 1.0, 0.0), v(1.0, 1.0, 0.0), v(1.0, 1.0, 1.0), v(0.0, 1.0, 1.0), colour, &self.face);
            add_sides(&mut edges, h, 1.0, colour, &self.edge);
            Some(face)
        };

        PistonParts {
            base,
            edges,
            top,
            bottom,
            face,
        }
    }
}

// West, north, south and east walls spanning `lo..hi` vertically.
fn add_sides(mesh: &mut SubMesh, lo: f32, hi: f32, colour: Colour4f, tex: &SubTexture) {
    let v = Vec3::new;
    mesh.add_quad(v(0.0, hi, 0.0), v(0.0, hi, 1.0), v(0.0, lo, 1.0), v(0.0, lo, 0.0), colour, tex);
    mesh.add_quad(v(1.0, hi, 0.0), v(0.0, hi, 0.0), v(0.0, lo, 0.0), v(1.0, lo, 0.0), colour, tex);
    mesh.add_quad(v(0.0, hi, 1.0), v(1.0, hi, 1.0), v(1.0, lo, 1.0), v(0.0, lo, 1.0), colour, tex);
    mesh.add_quad(v(1.0, hi, 1.0), v(1.0, hi, 0.0), v(1.0, lo, 0.0), v(1.0, lo, 1.0), colour, tex);
}

impl BlockType for PistonBase {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_solid(&self) -> bool {
        false
    }

    fn is_water(&self) -> bool {
        false
    }

    fn add_interior_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        self.add_edge_geometry(x, y, z, env, geometry);
    }

    fn add_edge_geometry(&self, x: i32, y: i32, z: i32, env: &BlockEnv<'_>, geometry: &mut Geometry) {
        let state = PistonState::from_data(env.chunk.block_data(x, y, z));
        let lightness = env.light(Lookup::Edge, LightFace::Top, x, y + 1, z);
        let parts = self.parts(state.extended, Colour4f::grey(lightness));
        let orientation = state.facing.orientation();

        let mut push = |mesh: &SubMesh, tex: &SubTexture| {
            if !mesh.is_empty() {
                mesh.push_to(geometry.get_mesh(tex.texture, MeshType::Solid), x, y, z, &orientation);
            }
        };
        push(&parts.base, &self.base_side);
        push(&parts.edges, &self.edge);
        push(&parts.top, &self.top);
        push(&parts.bottom, &self.bottom);
        if let Some(face) = &parts.face {
            push(face, &self.face);
        }
    }
}
