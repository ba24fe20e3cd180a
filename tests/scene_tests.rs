//! Scene graph tests.
//!
//! Covers hierarchy management, world-matrix propagation, transform
//! look_at, name lookup, and camera bookkeeping.

use glam::{Quat, Vec3};

use vantage::scene::{Camera, Node, Scene, Transform};

const EPSILON: f32 = 1e-4;

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn create_node_is_a_root() {
    let mut scene = Scene::new();
    let handle = scene.create_node("a");
    assert!(scene.root_nodes().contains(&handle));
    assert!(scene.get_node(handle).unwrap().parent().is_none());
}

#[test]
fn attach_sets_parent_and_child_links() {
    let mut scene = Scene::new();
    let parent = scene.create_node("parent");
    let child = scene.create_node("child");

    scene.attach(parent, child);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert_eq!(scene.get_node(parent).unwrap().children(), &[child]);
    assert!(
        !scene.root_nodes().contains(&child),
        "attached node must leave the root list"
    );
}

#[test]
fn attach_reparents_cleanly() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    let b = scene.create_node("b");
    let child = scene.create_node("child");

    scene.attach(a, child);
    scene.attach(b, child);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(b));
    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[child]);
}

#[test]
fn attach_to_self_is_ignored() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    scene.attach(a, a);
    assert!(scene.get_node(a).unwrap().parent().is_none());
    assert!(scene.get_node(a).unwrap().children().is_empty());
}

#[test]
fn find_by_name_searches_subtree() {
    let mut scene = Scene::new();
    let root = scene.create_node("root");
    let mid = scene.add_node(Node::new("mid"));
    let leaf = scene.add_node(Node::new("leaf"));
    scene.attach(root, mid);
    scene.attach(mid, leaf);

    assert_eq!(scene.find_by_name(root, "leaf"), Some(leaf));
    assert_eq!(scene.find_by_name(root, "root"), Some(root));
    assert_eq!(scene.find_by_name(mid, "root"), None);
    assert_eq!(scene.find_by_name(root, "missing"), None);
}

// ============================================================================
// World-matrix propagation
// ============================================================================

#[test]
fn world_matrix_chains_translations() {
    let mut scene = Scene::new();
    let parent = scene.create_node("parent");
    let child = scene.create_node("child");
    scene.attach(parent, child);

    scene.get_node_mut(parent).unwrap().transform.position = Vec3::new(1.0, 0.0, 0.0);
    scene.get_node_mut(child).unwrap().transform.position = Vec3::new(0.0, 2.0, 0.0);

    scene.update_matrix_world();

    let world = scene.get_node(child).unwrap().world_matrix().translation;
    assert!(approx_vec3(world.into(), Vec3::new(1.0, 2.0, 0.0)));
}

#[test]
fn world_matrix_applies_parent_scale() {
    let mut scene = Scene::new();
    let parent = scene.create_node("parent");
    let child = scene.create_node("child");
    scene.attach(parent, child);

    scene.get_node_mut(parent).unwrap().transform.scale = Vec3::splat(2.0);
    scene.get_node_mut(child).unwrap().transform.position = Vec3::new(1.0, 0.0, 0.0);

    scene.update_matrix_world();

    let world = scene.get_node(child).unwrap().world_matrix().translation;
    assert!(approx_vec3(world.into(), Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn world_matrix_tracks_later_mutation() {
    let mut scene = Scene::new();
    let node = scene.create_node("n");
    scene.update_matrix_world();

    scene.get_node_mut(node).unwrap().transform.position = Vec3::new(5.0, 0.0, 0.0);
    scene.update_matrix_world();

    let world = scene.get_node(node).unwrap().world_matrix().translation;
    assert!(approx_vec3(world.into(), Vec3::new(5.0, 0.0, 0.0)));
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn look_at_faces_target() {
    let mut transform = Transform::new();
    transform.position = Vec3::new(0.0, 0.0, 10.0);
    transform.look_at(Vec3::ZERO, Vec3::Y);

    // Camera convention: forward is -Z in local space
    let forward = transform.rotation * Vec3::NEG_Z;
    assert!(approx_vec3(forward, Vec3::NEG_Z));
}

#[test]
fn look_at_degenerate_up_is_ignored() {
    let mut transform = Transform::new();
    transform.position = Vec3::new(0.0, 10.0, 0.0);
    let before = transform.rotation;

    // Looking straight down with up parallel to the view direction
    transform.look_at(Vec3::ZERO, Vec3::Y);
    assert_eq!(transform.rotation, before);
}

#[test]
fn local_matrix_rebuilds_only_on_change() {
    let mut transform = Transform::new();
    assert!(transform.update_local_matrix(), "first update must build");
    assert!(!transform.update_local_matrix(), "no change, no rebuild");

    transform.rotation = Quat::from_rotation_y(1.0);
    assert!(transform.update_local_matrix());
}

// ============================================================================
// Cameras
// ============================================================================

#[test]
fn first_camera_becomes_active() {
    let mut scene = Scene::new();
    let cam = scene.add_camera_node("cam", Camera::new_perspective(45.0, 1.5, 0.1, 100.0));
    assert_eq!(scene.active_camera, Some(cam));
}

#[test]
fn scene_update_refreshes_camera_view() {
    let mut scene = Scene::new();
    let cam = scene.add_camera_node("cam", Camera::new_perspective(45.0, 1.5, 0.1, 100.0));
    scene.get_node_mut(cam).unwrap().transform.position = Vec3::new(3.0, 4.0, 5.0);

    scene.update();

    let (_, camera) = scene.query_active_camera().unwrap();
    assert!(approx_vec3(camera.world_position(), Vec3::new(3.0, 4.0, 5.0)));
}

#[test]
fn query_active_camera_none_without_camera() {
    let mut scene = Scene::new();
    scene.create_node("not a camera");
    assert!(scene.query_active_camera().is_none());
}
