use std::error::Error;
use std::fs;
use std::path::Path;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use hashbrown::HashMap;
use serde::Deserialize;
use strata_chunk::{AIR, BlockId, ChunkCoord, RawChunk};

/// Block ids the generator writes; defaults match `assets/blocks.toml`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub bedrock: BlockId,
    pub stone: BlockId,
    pub dirt: BlockId,
    pub grass: BlockId,
    pub sand: BlockId,
    pub water: BlockId,
    pub log: BlockId,
    pub leaves: BlockId,
    pub piston: BlockId,
    pub sticky_piston: BlockId,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bedrock: 7,
            stone: 1,
            dirt: 3,
            grass: 2,
            sand: 12,
            water: 9,
            log: 17,
            leaves: 18,
            piston: 33,
            sticky_piston: 29,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub min_height: i32,
    pub max_height: i32,
    pub frequency: f32,
    pub sea_level: i32,
    pub dirt_depth: i32,
    pub tree_probability: f32,
    pub trunk_min: i32,
    pub trunk_max: i32,
    pub leaf_radius: i32,
    /// Row of pistons in every facing on chunk (0, 0).
    pub piston_row: bool,
    pub palette: Palette,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            min_height: 40,
            max_height: 84,
            frequency: 0.02,
            sea_level: 58,
            dirt_depth: 3,
            tree_probability: 0.015,
            trunk_min: 4,
            trunk_max: 6,
            leaf_radius: 2,
            piston_row: true,
            palette: Palette::default(),
        }
    }
}

impl TerrainConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(src)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&s)?)
    }
}

fn hash2(ix: i32, iz: i32, seed: u32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iz as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Noise heightmap terrain with sea water, trees and a piston showcase row.
pub struct Terrain {
    cfg: TerrainConfig,
    seed: i32,
    height: FastNoiseLite,
}

impl Terrain {
    pub fn new(seed: i32, cfg: TerrainConfig) -> Self {
        let mut height = FastNoiseLite::with_seed(seed);
        height.set_noise_type(Some(NoiseType::OpenSimplex2));
        height.set_frequency(Some(cfg.frequency));
        Self { cfg, seed, height }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.cfg
    }

    /// Y of the topmost terrain block in world column `(wx, wz)`.
    pub fn height_at(&self, wx: i32, wz: i32) -> i32 {
        let top = RawChunk::HEIGHT as i32 - 1;
        let lo = self.cfg.min_height.clamp(1, top);
        let hi = self.cfg.max_height.clamp(lo, top);
        let n = self.height.get_noise_2d(wx as f32, wz as f32);
        let h = ((n + 1.0) * 0.5 * (hi - lo) as f32) as i32 + lo;
        h.clamp(lo, hi)
    }

    fn rand01(&self, ix: i32, iz: i32, salt: u32) -> f32 {
        let h = hash2(ix, iz, ((self.seed as u32) ^ salt).wrapping_add(0x9E37_79B9));
        ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
    }

    /// Generates the `(2r + 1)^2` chunks centred on chunk (0, 0), with sky light settled.
    pub fn generate(&self, radius: u32) -> HashMap<ChunkCoord, RawChunk> {
        let r = radius as i32;
        let mut world = World::default();
        for cz in -r..=r {
            for cx in -r..=r {
                let coord = ChunkCoord::new(cx, cz);
                let mut chunk = RawChunk::new(coord);
                self.fill_columns(&mut chunk);
                world.chunks.insert(coord, chunk);
            }
        }

        let mut trees = 0usize;
        for cz in -r..=r {
            for cx in -r..=r {
                let (ox, _, oz) = ChunkCoord::new(cx, cz).origin();
                for lz in 0..RawChunk::DEPTH as i32 {
                    for lx in 0..RawChunk::WIDTH as i32 {
                        if self.plant_tree(&mut world, ox + lx, oz + lz) {
                            trees += 1;
                        }
                    }
                }
            }
        }
        if self.cfg.piston_row {
            self.place_piston_row(&mut world);
        }

        for chunk in world.chunks.values_mut() {
            chunk.settle_sky_light();
        }
        log::info!(
            "terrain: seed={} chunks={} trees={}",
            self.seed,
            world.chunks.len(),
            trees
        );
        world.chunks
    }

    fn fill_columns(&self, chunk: &mut RawChunk) {
        let p = &self.cfg.palette;
        let sea = self.cfg.sea_level.clamp(0, RawChunk::HEIGHT as i32 - 1);
        let (ox, _, oz) = chunk.coord.origin();
        for z in 0..RawChunk::DEPTH as i32 {
            for x in 0..RawChunk::WIDTH as i32 {
                let h = self.height_at(ox + x, oz + z);
                let beach = h <= sea + 1;
                chunk.set_block(x, 0, z, p.bedrock, 0);
                for y in 1..=h {
                    let id = if y == h {
                        if beach { p.sand } else { p.grass }
                    } else if y > h - 1 - self.cfg.dirt_depth {
                        if beach { p.sand } else { p.dirt }
                    } else {
                        p.stone
                    };
                    chunk.set_block(x, y, z, id, 0);
                }
                for y in (h + 1)..=sea {
                    chunk.set_block(x, y, z, p.water, 0);
                }
            }
        }
    }

    fn plant_tree(&self, world: &mut World, wx: i32, wz: i32) -> bool {
        let p = &self.cfg.palette;
        if self.rand01(wx, wz, 0x7EE5) >= self.cfg.tree_probability {
            return false;
        }
        let h = self.height_at(wx, wz);
        if world.block(wx, h, wz) != p.grass {
            return false;
        }
        let span = (self.cfg.trunk_max - self.cfg.trunk_min).max(0) + 1;
        let trunk = self.cfg.trunk_min.max(1) + (hash2(wx, wz, self.seed as u32) % span as u32) as i32;
        let top = h + trunk;
        if top + 1 >= RawChunk::HEIGHT as i32 {
            return false;
        }
        for y in (h + 1)..=top {
            world.set(wx, y, wz, p.log);
        }
        let lr = self.cfg.leaf_radius.max(0);
        for dy in -lr..=1 {
            let rr = if dy >= 0 { lr - dy } else { lr };
            for dz in -rr..=rr {
                for dx in -rr..=rr {
                    if dx * dx + dz * dz > rr * rr + 1 {
                        continue;
                    }
                    let (x, y, z) = (wx + dx, top + dy, wz + dz);
                    if world.block(x, y, z) == AIR {
                        world.set(x, y, z, p.leaves);
                    }
                }
            }
        }
        true
    }

    // Retracted then extended, for each of the six facings, sticky on odd columns.
    fn place_piston_row(&self, world: &mut World) {
        let p = &self.cfg.palette;
        let z = 8;
        for facing in 0u8..6 {
            for (k, extended) in [false, true].into_iter().enumerate() {
                let x = 2 * facing as i32 + k as i32;
                if x >= RawChunk::WIDTH as i32 {
                    continue;
                }
                let y = world.top(x, z) + 1;
                let id = if x % 2 == 1 { p.sticky_piston } else { p.piston };
                let data = facing | if extended { 0x8 } else { 0 };
                world.set_with_data(x, y, z, id, data);
            }
        }
    }
}

#[derive(Default)]
struct World {
    chunks: HashMap<ChunkCoord, RawChunk>,
}

impl World {
    fn block(&self, wx: i32, y: i32, wz: i32) -> BlockId {
        let (coord, lx, lz) = ChunkCoord::containing(wx, wz);
        self.chunks
            .get(&coord)
            .map_or(AIR, |c| c.block_id(lx, y, lz))
    }

    fn top(&self, wx: i32, wz: i32) -> i32 {
        (0..RawChunk::HEIGHT as i32)
            .rev()
            .find(|&y| self.block(wx, y, wz) != AIR)
            .unwrap_or(0)
    }

    fn set(&mut self, wx: i32, y: i32, wz: i32, id: BlockId) {
        self.set_with_data(wx, y, wz, id, 0);
    }

    // Writes outside the generated area are dropped.
    fn set_with_data(&mut self, wx: i32, y: i32, wz: i32, id: BlockId, data: u8) {
        let (coord, lx, lz) = ChunkCoord::containing(wx, wz);
        if let Some(c) = self.chunks.get_mut(&coord) {
            c.set_block(lx, y, lz, id, data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> TerrainConfig {
        TerrainConfig {
            tree_probability: 0.05,
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn radius_sets_the_chunk_square() {
        let t = Terrain::new(7, small());
        assert_eq!(t.generate(0).len(), 1);
        let world = t.generate(1);
        assert_eq!(world.len(), 9);
        assert!(world.contains_key(&ChunkCoord::new(-1, 1)));
    }

    #[test]
    fn same_seed_same_world() {
        let a = Terrain::new(42, small()).generate(1);
        let b = Terrain::new(42, small()).generate(1);
        for (coord, ca) in &a {
            let cb = &b[coord];
            for y in 0..RawChunk::HEIGHT as i32 {
                for z in 0..16 {
                    for x in 0..16 {
                        assert_eq!(ca.block_id(x, y, z), cb.block_id(x, y, z));
                        assert_eq!(ca.block_data(x, y, z), cb.block_data(x, y, z));
                    }
                }
            }
        }
    }

    #[test]
    fn columns_have_bedrock_and_stay_in_range() {
        let cfg = small();
        let t = Terrain::new(3, cfg.clone());
        let world = t.generate(1);
        for (coord, chunk) in &world {
            let (ox, _, oz) = coord.origin();
            for z in 0..16 {
                for x in 0..16 {
                    let h = t.height_at(ox + x, oz + z);
                    assert!((cfg.min_height..=cfg.max_height).contains(&h));
                    assert_eq!(chunk.block_id(x, 0, z), cfg.palette.bedrock);
                    assert_ne!(chunk.block_id(x, h, z), AIR);
                }
            }
        }
    }

    #[test]
    fn low_columns_fill_with_water_to_sea_level() {
        let cfg = TerrainConfig {
            min_height: 10,
            max_height: 20,
            sea_level: 30,
            tree_probability: 0.0,
            piston_row: false,
            ..TerrainConfig::default()
        };
        let t = Terrain::new(1, cfg.clone());
        let world = t.generate(0);
        let chunk = &world[&ChunkCoord::new(0, 0)];
        for z in 0..16 {
            for x in 0..16 {
                let h = t.height_at(x, z);
                assert_eq!(chunk.block_id(x, h, z), cfg.palette.sand);
                assert_eq!(chunk.block_id(x, 30, z), cfg.palette.water);
                assert_eq!(chunk.block_id(x, 31, z), AIR);
                assert_eq!(chunk.sky_light(x, 31, z), 15);
                assert_eq!(chunk.sky_light(x, 30, z), 0);
            }
        }
    }

    #[test]
    fn piston_row_covers_every_facing() {
        let cfg = TerrainConfig {
            tree_probability: 0.0,
            ..TerrainConfig::default()
        };
        let p = cfg.palette.clone();
        let world = Terrain::new(9, cfg).generate(0);
        let chunk = &world[&ChunkCoord::new(0, 0)];
        let mut seen = Vec::new();
        for x in 0..12 {
            let y = (0..RawChunk::HEIGHT as i32)
                .rev()
                .find(|&y| chunk.block_id(x, y, 8) != AIR)
                .unwrap();
            let id = chunk.block_id(x, y, 8);
            assert!(id == p.piston || id == p.sticky_piston);
            seen.push(chunk.block_data(x, y, 8));
        }
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 8, 9, 10, 11, 12, 13]);
    }

    #[test]
    fn trees_stand_on_grass() {
        let cfg = TerrainConfig {
            tree_probability: 0.2,
            sea_level: 0,
            piston_row: false,
            ..TerrainConfig::default()
        };
        let p = cfg.palette.clone();
        let world = Terrain::new(5, cfg).generate(0);
        let chunk = &world[&ChunkCoord::new(0, 0)];
        let mut logs = 0;
        for y in 1..RawChunk::HEIGHT as i32 {
            for z in 0..16 {
                for x in 0..16 {
                    if chunk.block_id(x, y, z) == p.log {
                        logs += 1;
                        let below = chunk.block_id(x, y - 1, z);
                        assert!(below == p.log || below == p.grass);
                    }
                }
            }
        }
        assert!(logs > 0);
    }

    #[test]
    fn config_fields_default_when_missing() {
        let cfg = TerrainConfig::from_toml_str("sea_level = 12\n[palette]\nstone = 4\n").unwrap();
        assert_eq!(cfg.sea_level, 12);
        assert_eq!(cfg.palette.stone, 4);
        assert_eq!(cfg.palette.grass, 2);
        assert_eq!(cfg.max_height, 84);
        assert!(TerrainConfig::from_toml_str("sea_level = \"deep\"").is_err());
    }
}
