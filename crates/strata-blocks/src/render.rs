use std::time::Instant;

use strata_chunk::RawChunk;
use strata_mesh::Geometry;

use crate::context::{BlockContext, BlockEnv};
use crate::registry::BlockTypeRegistry;
use crate::types::BlockType;

/// Counters from one chunk's render pass.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ChunkRenderStats {
    pub interior_blocks: usize,
    pub edge_blocks: usize,
    pub quads: usize,
    pub micros: u128,
}

/// Appends the geometry of every non-air block in `chunk` to `geometry`, in chunk-local
/// coordinates.
///
/// Border columns go through [`BlockType::add_edge_geometry`] so their neighbours are resolved
/// by `context`; all others use the interior path.
pub fn render_chunk(
    chunk: &RawChunk,
    context: &dyn BlockContext,
    registry: &BlockTypeRegistry,
    geometry: &mut Geometry,
) -> ChunkRenderStats {
    let t0 = Instant::now();
    let env = BlockEnv::new(context, registry, chunk);
    let quads_before = geometry.quad_count();
    let mut stats = ChunkRenderStats::default();

    for y in 0..RawChunk::HEIGHT as i32 {
        for z in 0..RawChunk::DEPTH as i32 {
            for x in 0..RawChunk::WIDTH as i32 {
                let ty = registry.find(chunk.block_id(x, y, z), chunk.block_data(x, y, z));
                if ty.is_air() {
                    continue;
                }
                if RawChunk::is_edge(x, z) {
                    ty.add_edge_geometry(x, y, z, &env, geometry);
                    stats.edge_blocks += 1;
                } else {
                    ty.add_interior_geometry(x, y, z, &env, geometry);
                    stats.interior_blocks += 1;
                }
            }
        }
    }

    stats.quads = geometry.quad_count() - quads_before;
    stats.micros = t0.elapsed().as_micros();
    log::debug!(
        "chunk ({}, {}): {} interior, {} edge blocks, {} quads",
        chunk.coord.cx,
        chunk.coord.cz,
        stats.interior_blocks,
        stats.edge_blocks,
        stats.quads
    );
    log::info!(
        target: "perf",
        "us={} render_chunk cx={} cz={} quads={}",
        stats.micros,
        chunk.coord.cx,
        chunk.coord.cz,
        stats.quads
    );
    stats
}
