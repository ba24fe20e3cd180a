//! glTF loader tests.
//!
//! Uses small handwritten glTF documents with embedded (data URI) buffers
//! written to temporary files, so no fixture assets are needed.

use std::fs;
use std::path::PathBuf;

use glam::Vec3;

use vantage::animation::clip::{TargetProperty, TrackData};
use vantage::assets::{GltfLoader, asset_runtime};
use vantage::errors::ViewerError;
use vantage::scene::Scene;

/// Two keyframes at t=0,1 moving from the origin to (1, 2, 3), packed as
/// 8 little-endian f32s: [times | translations].
const ANIMATION_BUFFER_B64: &str = "AAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAQAAAQEA=";

fn write_temp_gltf(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("vantage_test_{}_{name}", std::process::id()));
    fs::write(&path, json).expect("failed to write temp gltf");
    path
}

fn animation_gltf_json() -> String {
    format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [ {{ "nodes": [0] }} ],
  "nodes": [ {{ "name": "pivot" }} ],
  "buffers": [ {{
    "uri": "data:application/octet-stream;base64,{ANIMATION_BUFFER_B64}",
    "byteLength": 32
  }} ],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 8 }},
    {{ "buffer": 0, "byteOffset": 8, "byteLength": 24 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [1.0] }},
    {{ "bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC3" }}
  ],
  "animations": [ {{
    "name": "slide",
    "samplers": [ {{ "input": 0, "output": 1, "interpolation": "LINEAR" }} ],
    "channels": [ {{ "sampler": 0, "target": {{ "node": 0, "path": "translation" }} }} ]
  }} ]
}}"#
    )
}

const SCENE_GLTF_JSON: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [
    { "name": "base", "translation": [1.0, 2.0, 3.0], "children": [1] },
    { "name": "pivot" }
  ]
}"#;

// ============================================================================
// Animation clips
// ============================================================================

#[test]
fn loads_clips_from_data_uri_buffer() {
    let path = write_temp_gltf("anim.gltf", &animation_gltf_json());
    let clips = asset_runtime()
        .block_on(GltfLoader::load_clips_async(path.to_str().unwrap()))
        .expect("clip load should succeed");
    let _ = fs::remove_file(&path);

    assert_eq!(clips.len(), 1);
    let clip = &clips[0];
    assert_eq!(clip.name, "slide");
    assert!((clip.duration() - 1.0).abs() < 1e-5);
    assert_eq!(clip.tracks.len(), 1);

    let track = &clip.tracks[0];
    assert_eq!(track.node_name, "pivot");
    assert_eq!(track.target, TargetProperty::Translation);

    match &track.data {
        TrackData::Vector3(kf) => {
            assert_eq!(kf.times, vec![0.0, 1.0]);
            let end = kf.sample(1.0).unwrap();
            assert!((end - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5, "got {end}");
        }
        other => panic!("expected a Vector3 track, got {other:?}"),
    }
}

#[test]
fn clip_load_missing_file_is_an_animation_error() {
    let result = asset_runtime().block_on(GltfLoader::load_clips_async(
        "/nonexistent/path/anims.gltf",
    ));

    match result {
        Err(ViewerError::AnimationAssetLoad { uri, .. }) => {
            assert!(uri.contains("anims.gltf"));
        }
        other => panic!("expected AnimationAssetLoad error, got {other:?}"),
    }
}

// ============================================================================
// Static scenes
// ============================================================================

#[test]
fn loads_scene_hierarchy_and_transforms() {
    let path = write_temp_gltf("scene.gltf", SCENE_GLTF_JSON);
    let mut scene = Scene::new();
    let root = asset_runtime()
        .block_on(GltfLoader::load_scene_async(
            path.to_str().unwrap(),
            &mut scene,
        ))
        .expect("scene load should succeed");
    let _ = fs::remove_file(&path);

    // Root node is named after the file, with the glTF roots beneath it
    let base = scene
        .find_by_name(root, "base")
        .expect("base node should load");
    let pivot = scene
        .find_by_name(root, "pivot")
        .expect("pivot node should load");

    assert_eq!(scene.get_node(pivot).unwrap().parent(), Some(base));

    let pos = scene.get_node(base).unwrap().transform.position;
    assert!((pos - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5, "got {pos}");
}

#[test]
fn scene_load_ignores_animations() {
    // The animation document also has a node hierarchy; loading it as a
    // scene must succeed and simply skip the animation data.
    let path = write_temp_gltf("mixed.gltf", &animation_gltf_json());
    let mut scene = Scene::new();
    let root = asset_runtime()
        .block_on(GltfLoader::load_scene_async(
            path.to_str().unwrap(),
            &mut scene,
        ))
        .expect("scene load should succeed");
    let _ = fs::remove_file(&path);

    assert!(scene.find_by_name(root, "pivot").is_some());
}

#[test]
fn scene_load_missing_file_is_a_static_error() {
    let mut scene = Scene::new();
    let result = asset_runtime().block_on(GltfLoader::load_scene_async(
        "/nonexistent/path/model.gltf",
        &mut scene,
    ));

    match result {
        Err(ViewerError::StaticAssetLoad { uri, .. }) => {
            assert!(uri.contains("model.gltf"));
        }
        other => panic!("expected StaticAssetLoad error, got {other:?}"),
    }
}
