use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use hashbrown::HashMap;
use strata_blocks::{BlockTypeRegistry, ChunkContext, TextureAtlas, WorldContext, render_chunk};
use strata_chunk::{ChunkCoord, LightStyle, RawChunk};
use strata_mesh::Geometry;

fn load_registry() -> BlockTypeRegistry {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let assets = root.join("../../assets");
    let atlas = TextureAtlas::from_path(assets.join("textures.toml")).unwrap();
    BlockTypeRegistry::from_path(assets.join("blocks.toml"), &atlas).unwrap()
}

// Rolling stone and grass with a few logs, pistons and a pond.
fn make_chunk(coord: ChunkCoord) -> RawChunk {
    let mut c = RawChunk::new(coord);
    for z in 0..16 {
        for x in 0..16 {
            let h = 60 + ((x * 3 + z * 5 + coord.cx * 7 + coord.cz * 11) % 6);
            for y in 0..h {
                c.set_block(x, y, z, 1, 0);
            }
            c.set_block(x, h, z, 2, 0);
            if (x + z) % 7 == 0 {
                for y in (h + 1)..(h + 5) {
                    c.set_block(x, y, z, 17, 0);
                }
            }
            if (x * z) % 11 == 3 {
                c.set_block(x, h + 1, z, 33, ((x + z) % 6) as u8 | if x % 2 == 0 { 0x8 } else { 0 });
            }
            if (4..8).contains(&x) && (4..8).contains(&z) {
                c.set_block(x, h, z, 9, 0);
            }
        }
    }
    c.settle_sky_light();
    c
}

fn bench_render_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_chunk");
    let reg = load_registry();
    let chunk = make_chunk(ChunkCoord::new(0, 0));
    let ctx = ChunkContext::new(LightStyle::Day);
    group.bench_function("terrain_16x128x16", |b| {
        b.iter(|| {
            let mut g = Geometry::new(reg.base_texture());
            let stats = render_chunk(&chunk, &ctx, &reg, &mut g);
            black_box((stats, g));
        })
    });
    group.finish();
}

fn bench_render_chunk_neighbours(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_chunk_neighbours");
    let reg = load_registry();
    let mut world = HashMap::new();
    for cz in -1..=1 {
        for cx in -1..=1 {
            let coord = ChunkCoord::new(cx, cz);
            world.insert(coord, make_chunk(coord));
        }
    }
    let ctx = WorldContext::new(LightStyle::Night, &world);
    group.bench_function("centre_of_3x3", |b| {
        b.iter(|| {
            let mut g = Geometry::new(reg.base_texture());
            if let Some(chunk) = world.get(&ChunkCoord::new(0, 0)) {
                render_chunk(chunk, &ctx, &reg, &mut g);
            }
            black_box(g);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_render_chunk, bench_render_chunk_neighbours);
criterion_main!(benches);
