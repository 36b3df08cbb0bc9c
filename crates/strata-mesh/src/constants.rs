//! Shared constants for strata-mesh.

/// Quads with less area than this are treated as degenerate.
pub(crate) const MIN_QUAD_AREA: f32 = 1e-6;

/// Vertices per quad and indices per quad (two triangles).
pub(crate) const QUAD_VERTS: usize = 4;
pub(crate) const QUAD_INDICES: usize = 6;
