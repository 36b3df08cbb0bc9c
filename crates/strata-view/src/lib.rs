//! View-dependent face lists over a finished geometry pool.
#![forbid(unsafe_code)]

use strata_geom::Vec3;
use strata_mesh::{Geometry, MeshType, TextureId};

pub const DEFAULT_QUALITY: f32 = 1.0;
pub const DEFAULT_NEAR_CLIP: f32 = 0.1;
pub const DEFAULT_FAR_CLIP: f32 = 10_000.0;

/// One visible quad of the last generated view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewFace {
    pub texture: TextureId,
    pub mesh_type: MeshType,
    /// Quad index within its bucket.
    pub quad: usize,
    /// Distance of the quad centre along the view direction.
    pub depth: f32,
    /// Approximate on-screen size in pixels.
    pub projected_size: f32,
}

/// Produces the faces worth drawing from a given viewpoint.
pub trait MeshViewGenerator {
    /// Pixel precision: faces projecting smaller than this are dropped.
    fn set_quality(&mut self, quality: f32);

    fn quality(&self) -> f32;

    fn set_near_clip(&mut self, near: f32);

    fn set_far_clip(&mut self, far: f32);

    /// Rebuilds the face list for an eye at `eye` looking at `target`.
    fn generate_for_view(&mut self, eye: Vec3, target: Vec3, focus: f32, view_width: f32);

    /// Faces produced by the last [`MeshViewGenerator::generate_for_view`].
    fn view_face_count(&self) -> usize {
        self.view_faces().len()
    }

    fn view_faces(&self) -> &[ViewFace];
}

/// [`MeshViewGenerator`] that culls, clips and drops quads of a [`Geometry`] one by one.
///
/// The face list is ordered back to front.
pub struct QuadViewGenerator<'g> {
    geometry: &'g Geometry,
    quality: f32,
    near: f32,
    far: f32,
    faces: Vec<ViewFace>,
}

impl<'g> QuadViewGenerator<'g> {
    pub fn new(geometry: &'g Geometry) -> Self {
        Self {
            geometry,
            quality: DEFAULT_QUALITY,
            near: DEFAULT_NEAR_CLIP,
            far: DEFAULT_FAR_CLIP,
            faces: Vec::new(),
        }
    }

    pub fn near_clip(&self) -> f32 {
        self.near
    }

    pub fn far_clip(&self) -> f32 {
        self.far
    }
}

impl MeshViewGenerator for QuadViewGenerator<'_> {
    fn set_quality(&mut self, quality: f32) {
        self.quality = quality.max(0.0);
    }

    fn quality(&self) -> f32 {
        self.quality
    }

    fn set_near_clip(&mut self, near: f32) {
        self.near = near;
    }

    fn set_far_clip(&mut self, far: f32) {
        self.far = far;
    }

    fn generate_for_view(&mut self, eye: Vec3, target: Vec3, focus: f32, view_width: f32) {
        self.faces.clear();
        let look = target - eye;
        if look.length() == 0.0 {
            log::warn!("view eye and target coincide at {:?}; no faces generated", eye);
            return;
        }
        let forward = look.normalized();
        let scale = focus * view_width;
        let (mut back, mut clipped, mut small) = (0usize, 0usize, 0usize);

        for (texture, mesh_type) in self.geometry.keys_sorted() {
            let Some(mesh) = self.geometry.mesh(texture, mesh_type) else {
                continue;
            };
            for quad in 0..mesh.quad_count() {
                let [a, b, c, d] = mesh.quad_corners(quad);
                let centre = (a + b + c + d) * 0.25;
                if mesh.quad_normal(quad).dot(eye - centre) <= 0.0 {
                    back += 1;
                    continue;
                }
                let depth = (centre - eye).dot(forward);
                if depth < self.near || depth > self.far {
                    clipped += 1;
                    continue;
                }
                let extent = a.distance(c).max(b.distance(d));
                let projected_size = extent * scale / depth;
                if projected_size < self.quality {
                    small += 1;
                    continue;
                }
                self.faces.push(ViewFace {
                    texture,
                    mesh_type,
                    quad,
                    depth,
                    projected_size,
                });
            }
        }

        self.faces.sort_by(|x, y| y.depth.total_cmp(&x.depth));
        log::debug!(
            "view: {} faces ({} back-facing, {} clipped, {} below {} px)",
            self.faces.len(),
            back,
            clipped,
            small,
            self.quality
        );
    }

    fn view_faces(&self) -> &[ViewFace] {
        &self.faces
    }
}
