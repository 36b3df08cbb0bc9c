//! Light styles and per-face shading.

use serde::Deserialize;

/// Brightest value of a 4-bit light nibble.
pub const MAX_LIGHT: u8 = 15;

const NIGHT_SKY_FACTOR: f32 = 0.4;
const CAVE_AMBIENT: f32 = 0.1;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightStyle {
    /// Everything fully lit.
    #[default]
    None,
    Day,
    Night,
    Cave,
}

impl LightStyle {
    /// Brightness in `[0, 1]` for a cell's sky and block light nibbles.
    pub fn lightness(self, sky: u8, block: u8) -> f32 {
        let max = f32::from(MAX_LIGHT);
        let sky = f32::from(sky.min(MAX_LIGHT));
        let block = f32::from(block.min(MAX_LIGHT));
        match self {
            LightStyle::None => 1.0,
            LightStyle::Day => sky.max(block) / max,
            LightStyle::Night => (sky * NIGHT_SKY_FACTOR).max(block) / max,
            LightStyle::Cave => (block / max).max(CAVE_AMBIENT),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(LightStyle::None),
            "day" => Some(LightStyle::Day),
            "night" => Some(LightStyle::Night),
            "cave" => Some(LightStyle::Cave),
            _ => None,
        }
    }
}

/// Face a light sample is taken for. North is -Z, west is -X.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LightFace {
    Top,
    Bottom,
    North,
    South,
    East,
    West,
}

impl LightFace {
    pub const ALL: [LightFace; 6] = [
        LightFace::Top,
        LightFace::Bottom,
        LightFace::North,
        LightFace::South,
        LightFace::East,
        LightFace::West,
    ];

    /// Integer step out of a block through this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            LightFace::Top => (0, 1, 0),
            LightFace::Bottom => (0, -1, 0),
            LightFace::North => (0, 0, -1),
            LightFace::South => (0, 0, 1),
            LightFace::East => (1, 0, 0),
            LightFace::West => (-1, 0, 0),
        }
    }

    /// Directional shading multiplier.
    #[inline]
    pub fn shade(self) -> f32 {
        match self {
            LightFace::Top => 1.0,
            LightFace::Bottom => 0.5,
            LightFace::North | LightFace::South => 0.8,
            LightFace::East | LightFace::West => 0.6,
        }
    }
}
