//! Unit-cube face builders shared by the block generators.
//!
//! Every face winds clockwise seen from outside the block and maps `(u0, v0)` to its first corner.

use strata_chunk::LightFace;
use strata_geom::{Colour4f, Vec3};
use strata_mesh::{Mesh, Quad, SubTexture};

use crate::context::{BlockEnv, Lookup};
use crate::types::BlockType;

/// Corners of `face` on the unit cube at the origin, in emission order.
pub fn face_corners(face: LightFace) -> [Vec3; 4] {
    let v = Vec3::new;
    match face {
        LightFace::Top => [v(0.0, 1.0, 0.0), v(1.0, 1.0, 0.0), v(1.0, 1.0, 1.0), v(0.0, 1.0, 1.0)],
        LightFace::Bottom => [v(0.0, 0.0, 0.0), v(0.0, 0.0, 1.0), v(1.0, 0.0, 1.0), v(1.0, 0.0, 0.0)],
        LightFace::West => [v(0.0, 1.0, 0.0), v(0.0, 1.0, 1.0), v(0.0, 0.0, 1.0), v(0.0, 0.0, 0.0)],
        LightFace::North => [v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0), v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0)],
        LightFace::South => [v(0.0, 1.0, 1.0), v(1.0, 1.0, 1.0), v(1.0, 0.0, 1.0), v(0.0, 0.0, 1.0)],
        LightFace::East => [v(1.0, 1.0, 1.0), v(1.0, 1.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 0.0, 1.0)],
    }
}

// Two in-plane steps towards a face corner, one per tangent axis.
#[inline]
fn tangent_steps(face: LightFace, corner: Vec3) -> ((i32, i32, i32), (i32, i32, i32)) {
    let step = |v: f32| if v == 0.0 { -1 } else { 1 };
    match face {
        LightFace::Top | LightFace::Bottom => ((step(corner.x), 0, 0), (0, 0, step(corner.z))),
        LightFace::North | LightFace::South => ((step(corner.x), 0, 0), (0, step(corner.y), 0)),
        LightFace::East | LightFace::West => ((0, step(corner.y), 0), (0, 0, step(corner.z))),
    }
}

/// Smoothed light at each corner of `face`: the mean of the four neighbour-layer cells sharing it.
pub fn corner_lights(env: &BlockEnv<'_>, lookup: Lookup, face: LightFace, x: i32, y: i32, z: i32) -> [f32; 4] {
    let (dx, dy, dz) = face.delta();
    let (nx, ny, nz) = (x + dx, y + dy, z + dz);
    face_corners(face).map(|corner| {
        let ((ax, ay, az), (bx, by, bz)) = tangent_steps(face, corner);
        let sum = env.light(lookup, face, nx, ny, nz)
            + env.light(lookup, face, nx + ax, ny + ay, nz + az)
            + env.light(lookup, face, nx + bx, ny + by, nz + bz)
            + env.light(lookup, face, nx + ax + bx, ny + ay + by, nz + az + bz);
        sum * 0.25
    })
}

/// The lit quad for `face` of the cell at `(x, y, z)`, without any occlusion test.
#[allow(clippy::too_many_arguments)]
pub fn face_quad(
    env: &BlockEnv<'_>,
    lookup: Lookup,
    face: LightFace,
    x: i32,
    y: i32,
    z: i32,
    tint: Colour4f,
    tex: &SubTexture,
) -> Quad {
    let offset = Vec3::new(x as f32, y as f32, z as f32);
    let [a, b, c, d] = face_corners(face).map(|p| p + offset);
    let colours = corner_lights(env, lookup, face, x, y, z).map(|l| tint.lit(l));
    Quad::new(a, b, c, d, tint, tex).with_colours(colours)
}

/// True when the cell beyond `face` hides it.
#[inline]
pub fn is_occluded(env: &BlockEnv<'_>, lookup: Lookup, face: LightFace, x: i32, y: i32, z: i32) -> bool {
    let (dx, dy, dz) = face.delta();
    env.block_type(lookup, x + dx, y + dy, z + dz).is_solid()
}

/// Emits `face` into `mesh` unless its neighbour is solid. Returns whether a quad was added.
#[allow(clippy::too_many_arguments)]
pub fn add_face(
    env: &BlockEnv<'_>,
    lookup: Lookup,
    face: LightFace,
    x: i32,
    y: i32,
    z: i32,
    tint: Colour4f,
    tex: &SubTexture,
    mesh: &mut Mesh,
) -> bool {
    if is_occluded(env, lookup, face, x, y, z) {
        return false;
    }
    mesh.add_quad(&face_quad(env, lookup, face, x, y, z, tint, tex))
}

macro_rules! face_builders {
    ($($edge:ident, $interior:ident => $face:expr;)*) => {
        $(
            /// Emits this face, resolving the neighbour through the block context.
            #[inline]
            pub fn $edge(
                env: &BlockEnv<'_>,
                x: i32,
                y: i32,
                z: i32,
                tint: Colour4f,
                tex: &SubTexture,
                mesh: &mut Mesh,
            ) -> bool {
                add_face(env, Lookup::Edge, $face, x, y, z, tint, tex, mesh)
            }

            /// Emits this face, reading the neighbour straight from the chunk.
            #[inline]
            pub fn $interior(
                env: &BlockEnv<'_>,
                x: i32,
                y: i32,
                z: i32,
                tint: Colour4f,
                tex: &SubTexture,
                mesh: &mut Mesh,
            ) -> bool {
                add_face(env, Lookup::Interior, $face, x, y, z, tint, tex, mesh)
            }
        )*
    };
}

face_builders! {
    add_top, add_interior_top => LightFace::Top;
    add_bottom, add_interior_bottom => LightFace::Bottom;
    add_north, add_interior_north => LightFace::North;
    add_south, add_interior_south => LightFace::South;
    add_east, add_interior_east => LightFace::East;
    add_west, add_interior_west => LightFace::West;
}
