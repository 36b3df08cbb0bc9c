use strata_mesh::Geometry;

use super::BlockType;
use crate::context::BlockEnv;

/// Empty space. Also what unknown ids resolve to.
#[derive(Clone, Debug)]
pub struct Air {
    name: String,
}

impl Air {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Air {
    fn default() -> Self {
        Self::new("Air")
    }
}

impl BlockType for Air {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_solid(&self) -> bool {
        false
    }

    fn is_water(&self) -> bool {
        false
    }

    fn add_interior_geometry(&self, _x: i32, _y: i32, _z: i32, _env: &BlockEnv<'_>, _geometry: &mut Geometry) {}

    fn add_edge_geometry(&self, _x: i32, _y: i32, _z: i32, _env: &BlockEnv<'_>, _geometry: &mut Geometry) {}
}
