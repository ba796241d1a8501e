//! Merger & Grouper Tests
//!
//! Tests for:
//! - MaterialGrouper: UUID-identity grouping, first-seen ordering
//! - GeometryMerger: world-space baking (positions and normals), index
//!   remapping, vertex welding, weld idempotence, UV seam preservation,
//!   per-group failure isolation

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Affine3A, Vec3};

use meshpress::pipeline::collector::MeshInstance;
use meshpress::pipeline::grouper::{group_by_material, MergeGroup};
use meshpress::pipeline::merger::merge_group;
use meshpress::pipeline::CompressOptions;
use meshpress::resources::{Geometry, Material};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn triangle() -> Geometry {
    let mut geo = Geometry::new();
    geo.set_positions(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    geo.set_normals(Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]));
    geo.set_uvs(Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]));
    geo.set_indices(Some(vec![0, 1, 2]));
    geo
}

fn instance(geometry: Geometry, world: Affine3A, material: &Arc<Material>) -> MeshInstance {
    MeshInstance {
        name: "test".to_string(),
        geometry,
        world,
        material: material.clone(),
    }
}

fn group_of(instances: Vec<MeshInstance>) -> MergeGroup {
    let material = instances[0].material.clone();
    MergeGroup {
        material,
        instances,
    }
}

// ============================================================================
// Grouper
// ============================================================================

#[test]
fn grouping_by_identity_not_structure() {
    // Identical field values, distinct uuids: must stay separate
    let a = Arc::new(Material::new("same_name"));
    let b = Arc::new(Material::new("same_name"));

    let groups = group_by_material(vec![
        instance(triangle(), Affine3A::IDENTITY, &a),
        instance(triangle(), Affine3A::IDENTITY, &b),
    ]);
    assert_eq!(groups.len(), 2);
}

#[test]
fn grouping_is_first_seen_stable() {
    let a = Arc::new(Material::new("a"));
    let b = Arc::new(Material::new("b"));

    let groups = group_by_material(vec![
        instance(triangle(), Affine3A::IDENTITY, &a),
        instance(triangle(), Affine3A::IDENTITY, &b),
        instance(triangle(), Affine3A::IDENTITY, &a),
    ]);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].material.uuid, a.uuid);
    assert_eq!(groups[0].instances.len(), 2);
    assert_eq!(groups[1].material.uuid, b.uuid);
    assert_eq!(groups[1].instances.len(), 1);
}

// ============================================================================
// Baking
// ============================================================================

#[test]
fn merge_bakes_translation_into_positions() {
    let material = Arc::new(Material::new("mat"));
    let world = Affine3A::from_translation(Vec3::new(5.0, 0.0, 0.0));
    let group = group_of(vec![instance(triangle(), world, &material)]);

    let merged = merge_group(&group, &CompressOptions::default()).unwrap();
    assert!(vec3_approx(
        merged.position(0).unwrap(),
        Vec3::new(5.0, 0.0, 0.0)
    ));
    assert!(vec3_approx(
        merged.position(1).unwrap(),
        Vec3::new(6.0, 0.0, 0.0)
    ));
}

#[test]
fn merge_rotates_normals_with_inverse_transpose() {
    let material = Arc::new(Material::new("mat"));
    // 90 degrees around Y: +Z normals become +X
    let world = Affine3A::from_rotation_y(FRAC_PI_2);
    let group = group_of(vec![instance(triangle(), world, &material)]);

    let merged = merge_group(&group, &CompressOptions::default()).unwrap();
    let normals = merged.normals().unwrap();
    assert!(vec3_approx(
        Vec3::new(normals[0], normals[1], normals[2]),
        Vec3::new(1.0, 0.0, 0.0)
    ));
}

#[test]
fn merge_renormalizes_normals_under_nonuniform_scale() {
    let material = Arc::new(Material::new("mat"));
    let world = Affine3A::from_scale(Vec3::new(2.0, 1.0, 1.0));
    let group = group_of(vec![instance(triangle(), world, &material)]);

    let merged = merge_group(&group, &CompressOptions::default()).unwrap();
    for lane in merged.normals().unwrap().chunks_exact(3) {
        let n = Vec3::new(lane[0], lane[1], lane[2]);
        assert!(approx(n.length(), 1.0));
    }
}

// ============================================================================
// Concatenation & index remapping
// ============================================================================

#[test]
fn merge_concatenates_disjoint_geometry() {
    let material = Arc::new(Material::new("mat"));
    let group = group_of(vec![
        instance(triangle(), Affine3A::IDENTITY, &material),
        instance(
            triangle(),
            Affine3A::from_translation(Vec3::new(10.0, 0.0, 0.0)),
            &material,
        ),
    ]);

    let merged = merge_group(&group, &CompressOptions::default()).unwrap();
    assert_eq!(merged.vertex_count(), 6);

    let indices = merged.indices().unwrap();
    assert_eq!(indices.len(), 6);
    // Second triangle references the appended vertices
    assert!(indices[3..].iter().all(|&i| i >= 3));
}

#[test]
fn merge_handles_non_indexed_input() {
    let material = Arc::new(Material::new("mat"));
    let mut geo = triangle();
    geo.set_indices(None);
    let group = group_of(vec![instance(geo, Affine3A::IDENTITY, &material)]);

    let merged = merge_group(&group, &CompressOptions::default()).unwrap();
    assert_eq!(merged.indices().unwrap(), &[0u32, 1, 2][..]);
}

#[test]
fn merge_rejects_out_of_range_indices() {
    let material = Arc::new(Material::new("mat"));
    let mut geo = triangle();
    geo.set_indices(Some(vec![0, 1, 7]));
    let group = group_of(vec![instance(geo, Affine3A::IDENTITY, &material)]);

    assert!(merge_group(&group, &CompressOptions::default()).is_err());
}

#[test]
fn merge_rejects_malformed_normals() {
    let material = Arc::new(Material::new("mat"));
    let mut geo = triangle();
    geo.set_normals(Some(vec![0.0, 0.0, 1.0])); // 1 normal for 3 vertices
    let group = group_of(vec![instance(geo, Affine3A::IDENTITY, &material)]);

    assert!(merge_group(&group, &CompressOptions::default()).is_err());
}

// ============================================================================
// Welding
// ============================================================================

#[test]
fn weld_collapses_coincident_vertices() {
    let material = Arc::new(Material::new("mat"));
    // Two copies of the same triangle at the same place
    let group = group_of(vec![
        instance(triangle(), Affine3A::IDENTITY, &material),
        instance(triangle(), Affine3A::IDENTITY, &material),
    ]);

    let merged = merge_group(&group, &CompressOptions::default()).unwrap();
    assert_eq!(merged.vertex_count(), 3);
    // Both triangles survive in the index buffer
    assert_eq!(merged.indices().unwrap().len(), 6);
}

#[test]
fn weld_preserves_uv_seams() {
    let material = Arc::new(Material::new("mat"));
    let mut seam = triangle();
    // Same positions and normals, shifted UVs: a textured seam
    seam.set_uvs(Some(vec![0.5, 0.0, 1.0, 0.0, 0.0, 1.0]));

    let group = group_of(vec![
        instance(triangle(), Affine3A::IDENTITY, &material),
        instance(seam, Affine3A::IDENTITY, &material),
    ]);

    let merged = merge_group(&group, &CompressOptions::default()).unwrap();
    // Vertex 0 differs in UV and must not merge; vertices 1 and 2 do merge
    assert_eq!(merged.vertex_count(), 4);
}

#[test]
fn weld_is_idempotent() {
    let material = Arc::new(Material::new("mat"));
    let group = group_of(vec![
        instance(triangle(), Affine3A::IDENTITY, &material),
        instance(triangle(), Affine3A::IDENTITY, &material),
        instance(
            triangle(),
            Affine3A::from_translation(Vec3::new(3.0, 0.0, 0.0)),
            &material,
        ),
    ]);

    let options = CompressOptions::default();
    let merged = merge_group(&group, &options).unwrap();
    let first_count = merged.vertex_count();

    // Run the already-welded output through again with the same tolerance
    let again = group_of(vec![instance(merged, Affine3A::IDENTITY, &material)]);
    let remerged = merge_group(&again, &options).unwrap();
    assert_eq!(remerged.vertex_count(), first_count);
}
