mod change_file;
mod terrain;

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use strata_blocks::{BlockTypeRegistry, TextureAtlas};
use strata_chunk::LightStyle;
use strata_geom::Vec3;
use strata_runtime::RenderPool;
use strata_view::{MeshViewGenerator, QuadViewGenerator};

use change_file::ChangeFile;
use terrain::{Terrain, TerrainConfig};

#[derive(Debug, Parser)]
#[command(name = "strata", version, about = "Meshes a generated voxel map and lists the faces visible from a viewpoint")]
struct Args {
    /// Directory holding textures.toml and blocks.toml.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Texture atlas description; defaults to <assets>/textures.toml.
    #[arg(long, value_name = "FILE")]
    textures: Option<PathBuf>,

    /// Block registry; defaults to <assets>/blocks.toml.
    #[arg(long, value_name = "FILE")]
    blocks: Option<PathBuf>,

    /// Terrain generator settings; built-in defaults when absent.
    #[arg(long, value_name = "FILE")]
    terrain: Option<PathBuf>,

    #[arg(long, default_value_t = 1337)]
    seed: i32,

    /// Chunks generated around chunk (0, 0) in each direction.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(0..=32))]
    radius: u32,

    /// none, day, night or cave.
    #[arg(long, default_value = "day", value_parser = parse_light_style)]
    light: LightStyle,

    /// Render threads; 0 uses every available core.
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Faces projecting smaller than this many pixels are dropped.
    #[arg(long, default_value_t = strata_view::DEFAULT_QUALITY)]
    quality: f32,

    #[arg(long, default_value_t = strata_view::DEFAULT_NEAR_CLIP)]
    near: f32,

    #[arg(long, default_value_t = strata_view::DEFAULT_FAR_CLIP)]
    far: f32,

    #[arg(long, default_value_t = 1.0)]
    focus: f32,

    #[arg(long = "view-width", default_value_t = 1920.0)]
    view_width: f32,

    /// Eye position as X,Y,Z; defaults to a point south of and above the map.
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_vec3)]
    eye: Option<Vec3>,

    /// Look-at point as X,Y,Z; defaults to the sea-level centre of chunk (0, 0).
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_vec3)]
    target: Option<Vec3>,

    /// Writes one "cx cz quads" line per rendered chunk.
    #[arg(long, value_name = "FILE")]
    changes: Option<PathBuf>,

    /// More log output; repeat for trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_light_style(s: &str) -> Result<LightStyle, String> {
    LightStyle::from_name(s).ok_or_else(|| format!("unknown light style '{s}'"))
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got '{s}'"));
    };
    let num = |v: &str| v.parse::<f32>().map_err(|e| format!("'{v}': {e}"));
    Ok(Vec3::new(num(x)?, num(y)?, num(z)?))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let t0 = Instant::now();
    let textures_path = args
        .textures
        .clone()
        .unwrap_or_else(|| args.assets.join("textures.toml"));
    let blocks_path = args
        .blocks
        .clone()
        .unwrap_or_else(|| args.assets.join("blocks.toml"));
    let atlas = TextureAtlas::from_path(&textures_path)?;
    let registry = BlockTypeRegistry::from_path(&blocks_path, &atlas)?;

    let terrain_cfg = match &args.terrain {
        Some(p) => TerrainConfig::load_from_path(p)?,
        None => TerrainConfig::default(),
    };
    let terrain = Terrain::new(args.seed, terrain_cfg);
    let chunks = terrain.generate(args.radius);

    let pool = RenderPool::new(args.workers)?;
    let render = pool.render_world(&chunks, args.light, &registry);

    if let Some(path) = &args.changes {
        let changes = ChangeFile::create(path);
        for (coord, stats) in &render.chunks {
            changes.write_line(&format!("{} {} {}", coord.cx, coord.cz, stats.quads));
        }
        changes.close();
        log::info!("wrote {} chunk lines to {}", render.chunks.len(), changes.path().display());
    }

    let sea = terrain.config().sea_level as f32;
    let target = args.target.unwrap_or(Vec3::new(8.0, sea, 8.0));
    let eye = args
        .eye
        .unwrap_or(target + Vec3::new(0.0, 48.0, -(args.radius as f32 + 1.5) * 16.0));
    let mut view = QuadViewGenerator::new(&render.geometry);
    view.set_quality(args.quality);
    view.set_near_clip(args.near);
    view.set_far_clip(args.far);
    view.generate_for_view(eye, target, args.focus, args.view_width);

    log::info!(
        target: "perf",
        "ms={} strata chunks={} quads={} view_faces={}",
        t0.elapsed().as_millis(),
        render.chunks.len(),
        render.quad_count(),
        view.view_face_count()
    );
    println!(
        "{} chunks, {} quads, {} faces visible from ({}, {}, {})",
        render.chunks.len(),
        render.quad_count(),
        view.view_face_count(),
        eye.x,
        eye.y,
        eye.z
    );
    Ok(())
}
