//! Parallel chunk rendering: private geometry pools per job, merged in chunk order.
#![forbid(unsafe_code)]

use std::thread;
use std::time::Instant;

use crossbeam_channel::{Sender, unbounded};
use hashbrown::HashMap;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use strata_blocks::{BlockTypeRegistry, ChunkRenderStats, WorldContext, render_chunk};
use strata_chunk::{ChunkCoord, LightStyle, RawChunk};
use strata_geom::Vec3;
use strata_mesh::Geometry;

#[derive(Clone, Copy, Debug)]
pub struct RenderJob {
    pub coord: ChunkCoord,
    pub job_id: u64,
}

/// One chunk's geometry in chunk-local coordinates.
pub struct JobOut {
    pub coord: ChunkCoord,
    pub job_id: u64,
    pub geometry: Geometry,
    pub stats: ChunkRenderStats,
    pub t_total_ms: u32,
}

/// Merged geometry of a set of chunks, in world coordinates.
pub struct WorldRender {
    pub geometry: Geometry,
    pub chunks: Vec<(ChunkCoord, ChunkRenderStats)>,
}

impl WorldRender {
    pub fn quad_count(&self) -> usize {
        self.geometry.quad_count()
    }
}

fn process_job(
    job: RenderJob,
    chunks: &HashMap<ChunkCoord, RawChunk>,
    ctx: &WorldContext<'_>,
    registry: &BlockTypeRegistry,
    tx: &Sender<JobOut>,
) {
    let t0 = Instant::now();
    let mut geometry = Geometry::new(registry.base_texture());
    let stats = match chunks.get(&job.coord) {
        Some(chunk) => render_chunk(chunk, ctx, registry, &mut geometry),
        None => {
            log::warn!("render job {} for unloaded chunk {:?}", job.job_id, job.coord);
            ChunkRenderStats::default()
        }
    };
    let out = JobOut {
        coord: job.coord,
        job_id: job.job_id,
        geometry,
        stats,
        t_total_ms: t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32,
    };
    // The receiver outlives the scope that runs the jobs.
    let _ = tx.send(out);
}

/// Worker pool for chunk render passes.
pub struct RenderPool {
    pool: ThreadPool,
    workers: usize,
}

impl RenderPool {
    /// `workers == 0` picks the machine's available parallelism.
    pub fn new(workers: usize) -> Result<Self, ThreadPoolBuildError> {
        let workers = if workers == 0 {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
        } else {
            workers
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("strata-render-{i}"))
            .build()?;
        log::info!("render pool: {} workers", workers);
        Ok(Self { pool, workers })
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Renders every coord in `order` on the pool and returns the outputs in that order.
    pub fn render_chunks(
        &self,
        chunks: &HashMap<ChunkCoord, RawChunk>,
        order: &[ChunkCoord],
        style: LightStyle,
        registry: &BlockTypeRegistry,
    ) -> Vec<JobOut> {
        let (tx, rx) = unbounded::<JobOut>();
        let ctx = WorldContext::new(style, chunks);
        self.pool.scope(|s| {
            for (i, &coord) in order.iter().enumerate() {
                let tx = tx.clone();
                let ctx = &ctx;
                s.spawn(move |_| {
                    let job = RenderJob {
                        coord,
                        job_id: i as u64,
                    };
                    process_job(job, chunks, ctx, registry, &tx);
                });
            }
        });
        drop(tx);

        let mut outs: Vec<JobOut> = rx.iter().collect();
        outs.sort_by_key(|o| o.job_id);
        outs
    }

    /// Renders all loaded chunks and merges them into one world-space pool.
    ///
    /// Chunks are merged in coordinate order, so the result does not depend on the worker count.
    pub fn render_world(
        &self,
        chunks: &HashMap<ChunkCoord, RawChunk>,
        style: LightStyle,
        registry: &BlockTypeRegistry,
    ) -> WorldRender {
        let t0 = Instant::now();
        let mut order: Vec<ChunkCoord> = chunks.keys().copied().collect();
        order.sort();
        let outs = self.render_chunks(chunks, &order, style, registry);
        let render = merge_outputs(registry, outs);
        log::info!(
            target: "perf",
            "ms={} render_world chunks={} quads={} workers={}",
            t0.elapsed().as_millis(),
            render.chunks.len(),
            render.quad_count(),
            self.workers
        );
        render
    }
}

/// Moves each chunk's geometry to its world position and appends it, in the given order.
pub fn merge_outputs(registry: &BlockTypeRegistry, outs: Vec<JobOut>) -> WorldRender {
    let mut geometry = Geometry::new(registry.base_texture());
    let mut chunks = Vec::with_capacity(outs.len());
    for out in outs {
        let (ox, oy, oz) = out.coord.origin();
        geometry.merge_at(&out.geometry, Vec3::new(ox as f32, oy as f32, oz as f32));
        log::debug!(
            "merged chunk ({}, {}): {} quads in {} ms",
            out.coord.cx,
            out.coord.cz,
            out.stats.quads,
            out.t_total_ms
        );
        chunks.push((out.coord, out.stats));
    }
    WorldRender { geometry, chunks }
}
