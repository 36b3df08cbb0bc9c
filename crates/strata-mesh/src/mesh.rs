use strata_geom::{Aabb, Colour4f, Vec3};

use crate::constants::{MIN_QUAD_AREA, QUAD_INDICES, QUAD_VERTS};
use crate::texture::SubTexture;

/// One textured quad. Corners wind clockwise seen from outside, so `(b - a) x (c - a)` points
/// into the block and the outward normal is its negation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    pub corners: [Vec3; 4],
    pub colours: [Colour4f; 4],
    pub uvs: [(f32, f32); 4],
}

impl Quad {
    /// A quad with one colour on every corner and UVs taken from `tex`.
    #[inline]
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3, colour: Colour4f, tex: &SubTexture) -> Self {
        Self {
            corners: [a, b, c, d],
            colours: [colour; 4],
            uvs: tex.corner_uvs(),
        }
    }

    #[inline]
    pub fn with_colours(mut self, colours: [Colour4f; 4]) -> Self {
        self.colours = colours;
        self
    }

    /// Area of the (planar) quad.
    #[inline]
    pub fn area(&self) -> f32 {
        let [a, b, c, d] = self.corners;
        0.5 * (c - a).cross(d - b).length()
    }

    /// Outward unit normal.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        let [a, b, c, _] = self.corners;
        (-(b - a).cross(c - a)).normalized()
    }

    /// True when two corners coincide or the quad has no area.
    pub fn is_degenerate(&self) -> bool {
        let c = &self.corners;
        for i in 0..QUAD_VERTS {
            for j in (i + 1)..QUAD_VERTS {
                if c[i] == c[j] {
                    return true;
                }
            }
        }
        !(self.area() > MIN_QUAD_AREA)
    }

    /// Applies `f` to every corner.
    #[inline]
    pub fn map_corners(mut self, mut f: impl FnMut(Vec3) -> Vec3) -> Self {
        for p in &mut self.corners {
            *p = f(*p);
        }
        self
    }
}

/// Accumulating vertex buffers for one (texture, mesh type) bucket.
#[derive(Default, Clone, Debug)]
pub struct Mesh {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub col: Vec<u8>,
    pub idx: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / QUAD_INDICES
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    /// Appends a quad as two triangles `(a, b, c)` and `(a, c, d)`.
    ///
    /// Degenerate quads are dropped and `false` is returned.
    pub fn add_quad(&mut self, quad: &Quad) -> bool {
        if quad.is_degenerate() {
            log::trace!("dropping degenerate quad {:?}", quad.corners);
            return false;
        }
        let base = self.vertex_count() as u32;
        let n = quad.normal();
        for i in 0..QUAD_VERTS {
            let p = quad.corners[i];
            self.pos.extend_from_slice(&[p.x, p.y, p.z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.uv.extend_from_slice(&[quad.uvs[i].0, quad.uvs[i].1]);
            self.col.extend_from_slice(&quad.colours[i].to_rgba8());
        }
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        true
    }

    /// Appends every quad of `other`, rebasing its indices.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertex_count() as u32;
        self.pos.extend_from_slice(&other.pos);
        self.norm.extend_from_slice(&other.norm);
        self.uv.extend_from_slice(&other.uv);
        self.col.extend_from_slice(&other.col);
        self.idx.extend(other.idx.iter().map(|&i| i + base));
    }

    /// Like [`Mesh::append`], moving every incoming vertex by `offset`.
    pub fn append_translated(&mut self, other: &Mesh, offset: Vec3) {
        let start = self.pos.len();
        self.append(other);
        for p in self.pos[start..].chunks_exact_mut(3) {
            p[0] += offset.x;
            p[1] += offset.y;
            p[2] += offset.z;
        }
    }

    #[inline]
    fn vertex(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos[i * 3], self.pos[i * 3 + 1], self.pos[i * 3 + 2])
    }

    /// Corner positions of quad `q`, in emission order.
    pub fn quad_corners(&self, q: usize) -> [Vec3; 4] {
        let i = &self.idx[q * QUAD_INDICES..(q + 1) * QUAD_INDICES];
        [
            self.vertex(i[0] as usize),
            self.vertex(i[1] as usize),
            self.vertex(i[2] as usize),
            self.vertex(i[5] as usize),
        ]
    }

    /// Stored outward normal of quad `q`.
    pub fn quad_normal(&self, q: usize) -> Vec3 {
        let v = self.idx[q * QUAD_INDICES] as usize;
        Vec3::new(self.norm[v * 3], self.norm[v * 3 + 1], self.norm[v * 3 + 2])
    }

    /// Per-vertex RGBA of quad `q`.
    pub fn quad_colours(&self, q: usize) -> [[u8; 4]; 4] {
        let i = &self.idx[q * QUAD_INDICES..(q + 1) * QUAD_INDICES];
        [i[0], i[1], i[2], i[5]].map(|v| {
            let v = v as usize * 4;
            [self.col[v], self.col[v + 1], self.col[v + 2], self.col[v + 3]]
        })
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points((0..self.vertex_count()).map(|i| self.vertex(i)))
    }
}
