use hashbrown::HashMap;
use strata_blocks::block_util::corner_lights;
use strata_blocks::{
    BlockEnv, BlockType, BlockTypeRegistry, ChunkContext, Log, Lookup, PistonBase, PistonFacing, Solid, Water,
    WorldContext, render_chunk,
};
use strata_chunk::{ChunkCoord, LightFace, LightStyle, RawChunk};
use strata_geom::{Rotation, Turn, Vec3};
use strata_mesh::{Geometry, MeshType, SubTexture, TextureId, TexturePackVersion};

const BASE: TextureId = TextureId(0);
const LOG_SIDE: TextureId = TextureId(1);
const LOG_TOP: TextureId = TextureId(2);
const STONE: TextureId = TextureId(3);
const PISTON_SIDE: TextureId = TextureId(4);
const PISTON_TOP: TextureId = TextureId(5);
const PISTON_BOTTOM: TextureId = TextureId(6);
const PISTON_FACE: TextureId = TextureId(7);
const WATER: TextureId = TextureId(8);

const LOG: u16 = 17;
const STONE_ID: u16 = 1;
const PISTON: u16 = 33;
const WATER_ID: u16 = 9;

fn page(t: TextureId) -> SubTexture {
    SubTexture::new(t, 0.0, 0.0, 1.0, 1.0, TexturePackVersion::Modern)
}

fn piston() -> PistonBase {
    PistonBase::new(
        "Piston",
        page(PISTON_SIDE),
        page(PISTON_TOP),
        page(PISTON_BOTTOM),
        page(PISTON_FACE),
    )
}

fn registry() -> BlockTypeRegistry {
    let mut reg = BlockTypeRegistry::new(BASE);
    reg.register(LOG, Log::new("Log", page(LOG_SIDE), page(LOG_TOP)));
    reg.register(STONE_ID, Solid::uniform("Stone", page(STONE)));
    reg.register(PISTON, piston());
    reg.register(WATER_ID, Water::new("Water", page(WATER)));
    reg
}

fn chunk() -> RawChunk {
    RawChunk::new(ChunkCoord::new(0, 0))
}

fn assert_well_formed(geometry: &Geometry) {
    for (key, mesh) in geometry.iter() {
        for q in 0..mesh.quad_count() {
            let c = mesh.quad_corners(q);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(c[i], c[j], "{key:?} quad {q} repeats a corner");
                }
            }
            let area = 0.5 * (c[2] - c[0]).cross(c[3] - c[1]).length();
            assert!(area > 1e-6, "{key:?} quad {q} has no area");
            let n = mesh.quad_normal(q);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }
}

// Every quad of a single block faces away from that block's centre.
fn assert_outward(geometry: &Geometry, x: i32, y: i32, z: i32) {
    let centre = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5);
    for (key, mesh) in geometry.iter() {
        for q in 0..mesh.quad_count() {
            let c = mesh.quad_corners(q);
            let mid = (c[0] + c[1] + c[2] + c[3]) * 0.25;
            assert!(mesh.quad_normal(q).dot(mid - centre) > 0.0, "{key:?} quad {q} faces inward");
        }
    }
}

#[test]
fn piston_direction_table() {
    use Rotation::{AntiClockwise, Clockwise};
    let expected = [
        (Turn::new(Clockwise, 180.0), Turn::new(Clockwise, 0.0)),
        (Turn::new(Rotation::None, 0.0), Turn::new(Clockwise, 0.0)),
        (Turn::new(Clockwise, 90.0), Turn::new(AntiClockwise, 90.0)),
        (Turn::new(Clockwise, 90.0), Turn::new(Clockwise, 90.0)),
        (Turn::new(Clockwise, 90.0), Turn::new(Clockwise, 0.0)),
        (Turn::new(Clockwise, 90.0), Turn::new(Clockwise, 180.0)),
    ];
    for (code, (vertical, horizontal)) in expected.into_iter().enumerate() {
        let o = PistonFacing::from_data(code as u8).orientation();
        assert_eq!(o.vertical, vertical, "code {code}");
        assert_eq!(o.horizontal, horizontal, "code {code}");
    }
}

#[test]
fn out_of_range_direction_is_upright() {
    let up = PistonFacing::Up.orientation();
    assert_eq!(PistonFacing::from_data(6).orientation(), up);
    assert_eq!(PistonFacing::from_data(7).orientation(), up);
}

#[test]
fn extended_piston_drops_face_and_edges() {
    let p = piston();
    let retracted = p.parts(false, Default::default());
    assert_eq!(retracted.face.as_ref().map(|f| f.len()), Some(1));
    assert_eq!(retracted.edges.len(), 4);
    assert_eq!(retracted.quad_count(), 11);

    let extended = p.parts(true, Default::default());
    assert!(extended.face.is_none());
    assert!(extended.edges.is_empty());
    assert_eq!(extended.quad_count(), 6);
}

#[test]
fn piston_side_texture_is_sliced_by_pack_version() {
    let legacy = SubTexture::new(PISTON_SIDE, 0.25, 0.5, 0.3125, 0.5625, TexturePackVersion::Legacy);
    let p = PistonBase::new("Piston", legacy, page(PISTON_TOP), page(PISTON_BOTTOM), page(PISTON_FACE));
    assert_eq!(p.base_side().v0, 0.5 + 1.0 / 256.0 * 4.0);
    assert_eq!(p.edge().v0, 0.5);
    assert_eq!(p.edge().v1, p.base_side().v0);
    assert_eq!(p.base_side().v1, 0.5625);

    let p = piston();
    assert_eq!(p.base_side().v0, 1.0 / 16.0 * 4.0);
    assert_eq!(p.edge().v1, p.base_side().v0);
}

#[test]
fn piston_buckets_follow_sub_mesh_textures() {
    let reg = registry();
    let mut c = chunk();
    c.set_block(5, 5, 5, PISTON, 1);
    let mut g = Geometry::new(BASE);
    render_chunk(&c, &ChunkContext::default(), &reg, &mut g);

    let count = |t| g.mesh(t, MeshType::Solid).map_or(0, |m| m.quad_count());
    assert_eq!(count(PISTON_SIDE), 8);
    assert_eq!(count(PISTON_TOP), 1);
    assert_eq!(count(PISTON_BOTTOM), 1);
    assert_eq!(count(PISTON_FACE), 1);
    assert_eq!(g.quad_count(), 11);
    assert_well_formed(&g);
    assert_outward(&g, 5, 5, 5);
}

#[test]
fn piston_face_points_along_facing() {
    let reg = registry();
    let ctx = ChunkContext::default();
    let dirs = [
        (PistonFacing::Down, Vec3::new(0.0, -1.0, 0.0)),
        (PistonFacing::Up, Vec3::new(0.0, 1.0, 0.0)),
        (PistonFacing::North, Vec3::new(0.0, 0.0, -1.0)),
        (PistonFacing::South, Vec3::new(0.0, 0.0, 1.0)),
        (PistonFacing::West, Vec3::new(-1.0, 0.0, 0.0)),
        (PistonFacing::East, Vec3::new(1.0, 0.0, 0.0)),
    ];
    for (facing, dir) in dirs {
        let mut c = chunk();
        c.set_block(5, 5, 5, PISTON, facing.code());
        let env = BlockEnv::new(&ctx, &reg, &c);
        let mut g = Geometry::new(BASE);
        piston().add_edge_geometry(5, 5, 5, &env, &mut g);

        let face = g.mesh(PISTON_FACE, MeshType::Solid).unwrap();
        assert_eq!(face.quad_count(), 1);
        assert!((face.quad_normal(0) - dir).length() < 1e-5, "{facing:?}");
        for p in face.quad_corners(0) {
            let local = p - Vec3::new(5.5, 5.5, 5.5);
            assert!((local.dot(dir) - 0.5).abs() < 1e-5, "{facing:?} face off the block side");
        }
        assert_outward(&g, 5, 5, 5);
    }
}

#[test]
fn log_interior_emits_top_and_four_sides() {
    let reg = registry();
    let ctx = ChunkContext::default();
    let mut c = chunk();
    c.set_block(5, 5, 5, LOG, 0);
    let env = BlockEnv::new(&ctx, &reg, &c);
    let mut g = Geometry::new(BASE);
    reg.find(LOG, 0).add_interior_geometry(5, 5, 5, &env, &mut g);

    assert_eq!(g.mesh(LOG_TOP, MeshType::Solid).unwrap().quad_count(), 1);
    assert_eq!(g.mesh(LOG_SIDE, MeshType::Solid).unwrap().quad_count(), 4);
    assert_eq!(g.quad_count(), 5);
    assert_well_formed(&g);
    assert_outward(&g, 5, 5, 5);
}

#[test]
fn log_edge_emits_six_faces_into_base_mesh() {
    let reg = registry();
    let ctx = ChunkContext::default();
    let mut c = chunk();
    c.set_block(0, 5, 7, LOG, 0);
    let env = BlockEnv::new(&ctx, &reg, &c);
    let mut g = Geometry::new(BASE);
    reg.find(LOG, 0).add_edge_geometry(0, 5, 7, &env, &mut g);

    assert_eq!(g.mesh(BASE, MeshType::Solid).unwrap().quad_count(), 6);
    assert_eq!(g.quad_count(), 6);
    assert_well_formed(&g);
    assert_outward(&g, 0, 5, 7);
}

#[test]
fn solid_neighbours_hide_faces() {
    let reg = registry();
    let ctx = ChunkContext::default();
    let mut c = chunk();
    c.set_block(5, 5, 5, LOG, 0);
    c.set_block(5, 6, 5, STONE_ID, 0);
    c.set_block(6, 5, 5, STONE_ID, 0);
    let env = BlockEnv::new(&ctx, &reg, &c);
    let mut g = Geometry::new(BASE);
    reg.find(LOG, 0).add_interior_geometry(5, 5, 5, &env, &mut g);
    assert!(g.mesh(LOG_TOP, MeshType::Solid).unwrap().is_empty());
    assert_eq!(g.mesh(LOG_SIDE, MeshType::Solid).unwrap().quad_count(), 3);
}

#[test]
fn edge_lookups_cross_into_loaded_neighbours() {
    let reg = registry();
    let mut here = chunk();
    here.set_block(15, 5, 7, LOG, 0);
    let mut east = RawChunk::new(ChunkCoord::new(1, 0));
    east.set_block(0, 5, 7, STONE_ID, 0);

    let mut g = Geometry::new(BASE);
    render_chunk(&here, &ChunkContext::default(), &reg, &mut g);
    assert_eq!(g.quad_count(), 6);

    let mut world = HashMap::new();
    world.insert(east.coord, east);
    let ctx = WorldContext::new(LightStyle::None, &world);
    let mut g = Geometry::new(BASE);
    render_chunk(&here, &ctx, &reg, &mut g);
    assert_eq!(g.quad_count(), 5);
}

#[test]
fn face_shade_reaches_vertex_colours() {
    let reg = registry();
    let ctx = ChunkContext::new(LightStyle::Day);
    let mut c = chunk();
    c.set_block(0, 64, 0, LOG, 0);
    let env = BlockEnv::new(&ctx, &reg, &c);
    let mut g = Geometry::new(BASE);
    reg.find(LOG, 0).add_edge_geometry(0, 64, 0, &env, &mut g);

    let mesh = g.mesh(BASE, MeshType::Solid).unwrap();
    // Emission order: top, bottom, north, south, east, west.
    assert_eq!(mesh.quad_colours(0), [[255, 255, 255, 255]; 4]);
    assert_eq!(mesh.quad_colours(1), [[128, 128, 128, 255]; 4]);
    assert_eq!(mesh.quad_colours(4), [[153, 153, 153, 255]; 4]);
}

fn piston_colours(style: LightStyle) -> Vec<[u8; 4]> {
    let reg = registry();
    let mut c = chunk();
    c.set_block(5, 64, 5, PISTON, 1);
    c.set_block(8, 64, 8, LOG, 0);
    c.settle_sky_light();
    let mut g = Geometry::new(BASE);
    render_chunk(&c, &ChunkContext::new(style), &reg, &mut g);

    let mut out = Vec::new();
    for t in [PISTON_SIDE, PISTON_TOP, PISTON_BOTTOM, PISTON_FACE] {
        let mesh = g.mesh(t, MeshType::Solid).unwrap();
        for q in 0..mesh.quad_count() {
            out.extend(mesh.quad_colours(q));
        }
    }
    out
}

#[test]
fn piston_under_open_sky_takes_light_from_above() {
    let day = piston_colours(LightStyle::Day);
    assert_eq!(day.len(), 11 * 4);
    assert!(day.iter().all(|&c| c == [255, 255, 255, 255]));

    let night = piston_colours(LightStyle::Night);
    assert!(night.iter().all(|&c| c == [102, 102, 102, 255]));
}

#[test]
fn roofed_piston_is_darker_than_open_one() {
    let reg = registry();
    let mut c = chunk();
    c.set_block(5, 64, 5, PISTON, 1);
    c.set_block(5, 66, 5, STONE_ID, 0);
    c.set_block(9, 64, 9, PISTON, 1);
    c.settle_sky_light();
    c.set_block_light(5, 65, 5, 6);
    let mut g = Geometry::new(BASE);
    render_chunk(&c, &ChunkContext::new(LightStyle::Day), &reg, &mut g);

    let face = g.mesh(PISTON_FACE, MeshType::Solid).unwrap();
    assert_eq!(face.quad_count(), 2);
    // Quads land in row-major order: y, then z, then x.
    let roofed = face.quad_colours(0)[0];
    let open = face.quad_colours(1)[0];
    assert_eq!(open, [255, 255, 255, 255]);
    assert_eq!(roofed, [102, 102, 102, 255]);
}

#[test]
fn occluded_corners_are_darker() {
    let reg = registry();
    let ctx = ChunkContext::new(LightStyle::Day);
    let mut c = chunk();
    c.set_block(5, 5, 5, STONE_ID, 0);
    c.set_block(4, 6, 4, STONE_ID, 0);
    c.settle_sky_light();
    let env = BlockEnv::new(&ctx, &reg, &c);

    let top = corner_lights(&env, Lookup::Interior, LightFace::Top, 5, 5, 5);
    // Corner (0, 1, 0) touches the stone at (4, 6, 4); the opposite corner is open sky.
    assert!((top[0] - 0.75).abs() < 1e-6);
    assert_eq!(top[2], 1.0);
}

#[test]
fn water_column_only_caps_the_surface() {
    let reg = registry();
    let mut c = chunk();
    c.set_block(5, 5, 5, WATER_ID, 0);
    c.set_block(5, 6, 5, WATER_ID, 0);
    let mut g = Geometry::new(BASE);
    render_chunk(&c, &ChunkContext::default(), &reg, &mut g);

    let mesh = g.mesh(WATER, MeshType::Transparent).unwrap();
    assert_eq!(mesh.quad_count(), 10);
    assert!(g.mesh(WATER, MeshType::Solid).is_none());
    let top = mesh.bounds().unwrap().max.y;
    assert_eq!(top, 6.0 + 14.0 / 16.0);
    assert_well_formed(&g);
}

#[test]
fn render_chunk_splits_edge_and_interior_blocks() {
    let reg = registry();
    let mut c = chunk();
    c.set_block(0, 5, 0, LOG, 0);
    c.set_block(5, 5, 5, LOG, 0);
    let mut g = Geometry::new(BASE);
    let stats = render_chunk(&c, &ChunkContext::default(), &reg, &mut g);
    assert_eq!(stats.edge_blocks, 1);
    assert_eq!(stats.interior_blocks, 1);
    assert_eq!(stats.quads, 11);
    assert_eq!(g.mesh(BASE, MeshType::Solid).unwrap().quad_count(), 6);

    let mut empty = Geometry::new(BASE);
    let stats = render_chunk(&chunk(), &ChunkContext::default(), &reg, &mut empty);
    assert_eq!(stats.quads, 0);
    assert!(empty.is_empty());
}
