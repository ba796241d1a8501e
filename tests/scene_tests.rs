//! Scene Graph & Collector Tests
//!
//! Tests for:
//! - Scene: add nodes, parent/child wiring, attach/re-parent
//! - SceneCollector: stack-based traversal, world transform composition,
//!   visibility filtering, deterministic ordering, deep hierarchies

use std::sync::Arc;

use glam::{Mat4, Vec3};

use meshpress::pipeline::collector::collect_meshes;
use meshpress::resources::{Geometry, Material};
use meshpress::scene::{Node, NodeHandle, Scene};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn triangle() -> Arc<Geometry> {
    let mut geo = Geometry::new();
    geo.set_positions(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    geo.set_normals(Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]));
    geo.set_uvs(Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]));
    geo.set_indices(Some(vec![0, 1, 2]));
    Arc::new(geo)
}

fn mesh_node(scene: &mut Scene, name: &str, material: &Arc<Material>) -> NodeHandle {
    let handle = scene.add_node(Node::new());
    let key = scene.create_mesh(handle, triangle(), material.clone());
    scene.meshes[key].name = name.to_string();
    handle
}

// ============================================================================
// Hierarchy wiring
// ============================================================================

#[test]
fn scene_add_node_to_root() {
    let mut scene = Scene::new();
    let handle = scene.add_node(Node::new());
    assert!(scene.root_nodes.contains(&handle));
    assert!(scene.get_node(handle).is_some());
}

#[test]
fn scene_add_to_parent_wires_both_sides() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new());
    let child = scene.add_to_parent(Node::new(), parent);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert!(scene.get_node(parent).unwrap().children().contains(&child));
    assert!(!scene.root_nodes.contains(&child));
}

#[test]
fn scene_attach_reparents() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new());
    let b = scene.add_node(Node::new());
    let child = scene.add_to_parent(Node::new(), a);

    scene.attach(child, b);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(b));
    assert!(!scene.get_node(a).unwrap().children().contains(&child));
    assert!(scene.get_node(b).unwrap().children().contains(&child));
}

#[test]
fn scene_attach_moves_root_under_parent() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new());
    let other = scene.add_node(Node::new());

    scene.attach(other, root);

    assert!(!scene.root_nodes.contains(&other));
    assert_eq!(scene.get_node(other).unwrap().parent(), Some(root));
}

// ============================================================================
// Collector
// ============================================================================

#[test]
fn collect_empty_scene_is_empty() {
    let scene = Scene::new();
    assert!(collect_meshes(&scene).is_empty());
}

#[test]
fn collect_skips_nodes_without_meshes() {
    let mut scene = Scene::new();
    scene.add_node(Node::new());
    scene.add_node(Node::new());
    assert!(collect_meshes(&scene).is_empty());
}

#[test]
fn collect_composes_world_transform() {
    let mut scene = Scene::new();
    let material = Arc::new(Material::new("mat"));

    let mut root = Node::new();
    root.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let root = scene.add_node(root);

    let mut child = Node::new();
    child.transform.position = Vec3::new(0.0, 2.0, 0.0);
    let child = scene.add_to_parent(child, root);
    scene.create_mesh(child, triangle(), material);

    let instances = collect_meshes(&scene);
    assert_eq!(instances.len(), 1);

    let translation = Vec3::from(instances[0].world.translation);
    assert!(approx(translation.x, 1.0));
    assert!(approx(translation.y, 2.0));
    assert!(approx(translation.z, 0.0));
}

#[test]
fn collect_scales_compose_down_the_chain() {
    let mut scene = Scene::new();
    let material = Arc::new(Material::new("mat"));

    let mut root = Node::new();
    root.transform.scale = Vec3::splat(2.0);
    let root = scene.add_node(root);

    let mut child = Node::new();
    child.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let child = scene.add_to_parent(child, root);
    scene.create_mesh(child, triangle(), material);

    let instances = collect_meshes(&scene);
    // Parent scale applies to the child's translation
    let translation = Vec3::from(instances[0].world.translation);
    assert!(approx(translation.x, 2.0));
}

#[test]
fn collect_honors_loader_style_matrix_transforms() {
    let mut scene = Scene::new();
    let material = Arc::new(Material::new("mat"));

    // A loader hands over a column-major Mat4 instead of a TRS triple
    let mut node = Node::new();
    node.transform
        .apply_local_matrix_from_mat4(Mat4::from_translation(Vec3::new(3.0, -1.0, 2.0)));
    let handle = scene.add_node(node);
    scene.create_mesh(handle, triangle(), material);

    let instances = collect_meshes(&scene);
    let translation = Vec3::from(instances[0].world.translation);
    assert!(approx(translation.x, 3.0));
    assert!(approx(translation.y, -1.0));
    assert!(approx(translation.z, 2.0));
}

#[test]
fn collect_preserves_scene_order() {
    let mut scene = Scene::new();
    let material = Arc::new(Material::new("mat"));

    mesh_node(&mut scene, "first", &material);
    mesh_node(&mut scene, "second", &material);
    mesh_node(&mut scene, "third", &material);

    let names: Vec<String> = collect_meshes(&scene)
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, ["first", "second", "third"]);
}

#[test]
fn collect_skips_invisible_nodes() {
    let mut scene = Scene::new();
    let material = Arc::new(Material::new("mat"));

    let visible = mesh_node(&mut scene, "visible", &material);
    let hidden = mesh_node(&mut scene, "hidden", &material);
    scene.get_node_mut(hidden).unwrap().visible = false;

    let instances = collect_meshes(&scene);
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].name, "visible");
    assert!(scene.get_node(visible).is_some());
}

#[test]
fn collect_survives_deep_hierarchies() {
    let mut scene = Scene::new();
    let material = Arc::new(Material::new("mat"));

    let mut parent = scene.add_node(Node::new());
    for _ in 0..10_000 {
        let mut node = Node::new();
        node.transform.position = Vec3::new(0.001, 0.0, 0.0);
        parent = scene.add_to_parent(node, parent);
    }
    scene.create_mesh(parent, triangle(), material);

    // Iterative walk: no stack overflow, transform fully composed
    let instances = collect_meshes(&scene);
    assert_eq!(instances.len(), 1);
    let translation = Vec3::from(instances[0].world.translation);
    assert!((translation.x - 10.0).abs() < 0.1);
}
