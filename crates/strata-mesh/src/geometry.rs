use hashbrown::HashMap;
use strata_geom::{Aabb, Vec3};

use crate::mesh::Mesh;
use crate::texture::TextureId;

/// Draw class of a mesh bucket.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum MeshType {
    Solid,
    AlphaTest,
    /// Blended geometry; water lands here.
    Transparent,
}

/// Mesh pool for one render pass, keyed by texture and mesh type.
///
/// Not synchronised: each worker owns its own pool and pools are combined with [`Geometry::merge`].
#[derive(Clone, Debug)]
pub struct Geometry {
    base_texture: TextureId,
    meshes: HashMap<(TextureId, MeshType), Mesh>,
}

impl Geometry {
    pub fn new(base_texture: TextureId) -> Self {
        Self {
            base_texture,
            meshes: HashMap::new(),
        }
    }

    #[inline]
    pub fn base_texture(&self) -> TextureId {
        self.base_texture
    }

    /// The bucket for `(texture, ty)`, created on first use.
    #[inline]
    pub fn get_mesh(&mut self, texture: TextureId, ty: MeshType) -> &mut Mesh {
        self.meshes.entry((texture, ty)).or_default()
    }

    /// The solid bucket of the base texture.
    #[inline]
    pub fn base_mesh(&mut self) -> &mut Mesh {
        self.get_mesh(self.base_texture, MeshType::Solid)
    }

    #[inline]
    pub fn mesh(&self, texture: TextureId, ty: MeshType) -> Option<&Mesh> {
        self.meshes.get(&(texture, ty))
    }

    /// Bucket keys in a stable order (mesh type, then texture) for deterministic draw submission.
    pub fn keys_sorted(&self) -> Vec<(TextureId, MeshType)> {
        let mut keys: Vec<_> = self.meshes.keys().copied().collect();
        keys.sort_by_key(|&(t, ty)| (ty, t));
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(TextureId, MeshType), &Mesh)> {
        self.meshes.iter()
    }

    pub fn quad_count(&self) -> usize {
        self.meshes.values().map(Mesh::quad_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.values().all(Mesh::is_empty)
    }

    /// Appends all of `other`'s buckets into this pool.
    pub fn merge(&mut self, other: &Geometry) {
        for key in other.keys_sorted() {
            if let Some(m) = other.meshes.get(&key) {
                self.meshes.entry(key).or_default().append(m);
            }
        }
    }

    /// Appends `other`'s buckets with every vertex moved by `offset`.
    pub fn merge_at(&mut self, other: &Geometry, offset: Vec3) {
        for key in other.keys_sorted() {
            if let Some(m) = other.meshes.get(&key) {
                self.meshes.entry(key).or_default().append_translated(m, offset);
            }
        }
    }

    pub fn bounds(&self) -> Option<Aabb> {
        let mut out: Option<Aabb> = None;
        for m in self.meshes.values() {
            if let Some(bb) = m.bounds() {
                match &mut out {
                    Some(acc) => {
                        acc.include(bb.min);
                        acc.include(bb.max);
                    }
                    None => out = Some(bb),
                }
            }
        }
        out
    }
}
