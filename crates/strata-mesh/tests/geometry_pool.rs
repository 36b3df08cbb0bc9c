use proptest::prelude::*;
use strata_geom::{Colour4f, Vec3};
use strata_mesh::{Geometry, MeshType, Quad, SubTexture, TextureId, TexturePackVersion};

fn tex(id: u32) -> SubTexture {
    SubTexture::new(TextureId(id), 0.0, 0.0, 1.0, 1.0, TexturePackVersion::Modern)
}

fn unit_top(x: f32, y: f32, z: f32, t: &SubTexture) -> Quad {
    Quad::new(
        Vec3::new(x, y + 1.0, z),
        Vec3::new(x + 1.0, y + 1.0, z),
        Vec3::new(x + 1.0, y + 1.0, z + 1.0),
        Vec3::new(x, y + 1.0, z + 1.0),
        Colour4f::WHITE,
        t,
    )
}

#[test]
fn base_mesh_is_solid_bucket_of_base_texture() {
    let mut g = Geometry::new(TextureId(4));
    g.base_mesh().add_quad(&unit_top(0.0, 0.0, 0.0, &tex(4)));
    assert_eq!(g.mesh(TextureId(4), MeshType::Solid).unwrap().quad_count(), 1);
    assert!(g.mesh(TextureId(4), MeshType::Transparent).is_none());
}

#[test]
fn keys_sort_by_mesh_type_then_texture() {
    let mut g = Geometry::new(TextureId(0));
    g.get_mesh(TextureId(2), MeshType::Transparent);
    g.get_mesh(TextureId(5), MeshType::Solid);
    g.get_mesh(TextureId(1), MeshType::Solid);
    assert_eq!(
        g.keys_sorted(),
        vec![
            (TextureId(1), MeshType::Solid),
            (TextureId(5), MeshType::Solid),
            (TextureId(2), MeshType::Transparent),
        ]
    );
    assert!(g.is_empty());
}

#[test]
fn bounds_cover_all_buckets() {
    let mut g = Geometry::new(TextureId(0));
    g.get_mesh(TextureId(1), MeshType::Solid)
        .add_quad(&unit_top(0.0, 0.0, 0.0, &tex(1)));
    g.get_mesh(TextureId(2), MeshType::Transparent)
        .add_quad(&unit_top(3.0, 5.0, -2.0, &tex(2)));
    let bb = g.bounds().unwrap();
    assert_eq!(bb.min, Vec3::new(0.0, 1.0, -2.0));
    assert_eq!(bb.max, Vec3::new(4.0, 6.0, 1.0));
}

proptest! {
    // Merging private pools preserves every quad and its bucket
    #[test]
    fn merge_preserves_quad_counts(a in prop::collection::vec((0u32..4, 0i32..16, 0i32..16), 0..20),
                                   b in prop::collection::vec((0u32..4, 0i32..16, 0i32..16), 0..20)) {
        let fill = |items: &[(u32, i32, i32)]| {
            let mut g = Geometry::new(TextureId(0));
            for &(t, x, z) in items {
                g.get_mesh(TextureId(t), MeshType::Solid).add_quad(&unit_top(x as f32, 0.0, z as f32, &tex(t)));
            }
            g
        };
        let ga = fill(&a);
        let gb = fill(&b);
        let mut merged = ga.clone();
        merged.merge(&gb);
        prop_assert_eq!(merged.quad_count(), a.len() + b.len());
        for t in 0..4 {
            let count = |g: &Geometry| g.mesh(TextureId(t), MeshType::Solid).map_or(0, |m| m.quad_count());
            prop_assert_eq!(count(&merged), count(&ga) + count(&gb));
        }
    }
}
