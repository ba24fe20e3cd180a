use glam::Vec3;
use winit::keyboard::KeyCode;

use vantage::app::App;
use vantage::assets::{GltfLoader, asset_runtime, spawn_clip_load};
use vantage::errors::Result;
use vantage::playback::{PlayOutcome, PlaybackController};
use vantage::scene::{Camera, Light};
use vantage::utils::OrbitControls;

const DEFAULT_MODEL_URI: &str = "models/StaticModel.gltf";
const DEFAULT_ANIMATION_URI: &str = "models/Animations.gltf";

const CAMERA_POSITION: Vec3 = Vec3::new(100.0, 50.0, 200.0);
const LIGHT_POSITION: Vec3 = Vec3::new(-300.0, 150.0, 300.0);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let model_uri = args.next().unwrap_or_else(|| DEFAULT_MODEL_URI.to_string());
    let animation_uri = args
        .next()
        .unwrap_or_else(|| DEFAULT_ANIMATION_URI.to_string());

    let mut app = App::new().with_title("vantage");

    app.scene
        .add_light_node("ambient", Light::ambient(Vec3::ONE, 0.6));
    let sun = app
        .scene
        .add_light_node("sun", Light::directional(Vec3::ONE, 1.2));
    if let Some(node) = app.scene.get_node_mut(sun) {
        node.transform.position = LIGHT_POSITION;
    }

    let camera = Camera::new_perspective(45.0, 1280.0 / 720.0, 0.1, 2000.0);
    let camera_node = app.scene.add_camera_node("main_camera", camera);
    if let Some(node) = app.scene.get_node_mut(camera_node) {
        node.transform.position = CAMERA_POSITION;
        node.transform.look_at(Vec3::ZERO, Vec3::Y);
    }

    // The static model is loaded up front; the animation set waits until the
    // user asks for playback.
    let mut controller = match asset_runtime()
        .block_on(GltfLoader::load_scene_async(&model_uri, &mut app.scene))
    {
        Ok(root) => Some(PlaybackController::new(root, animation_uri)),
        Err(e) => {
            log::error!("{e}");
            None
        }
    };

    let mut orbit = OrbitControls::from_position(Vec3::ZERO, CAMERA_POSITION);
    orbit.max_distance = 1500.0;
    let mut pending_clips = None;

    app.set_update_fn(move |scene, input, dt| {
        if input.was_key_pressed(KeyCode::Space) {
            match &mut controller {
                Some(ctrl) => {
                    if ctrl.trigger_play() == PlayOutcome::LoadStarted {
                        pending_clips = Some(spawn_clip_load(ctrl.animation_uri().to_string()));
                    }
                }
                None => log::warn!("no model loaded, ignoring play request"),
            }
        }

        if let Some(rx) = &pending_clips {
            if let Ok(result) = rx.try_recv() {
                if let Some(ctrl) = &mut controller {
                    ctrl.complete_load(scene, result);
                }
                pending_clips = None;
            }
        }

        if let Some(ctrl) = &mut controller {
            ctrl.per_frame_update(scene, dt);
        }

        if let Some((transform, camera)) = scene.query_active_camera() {
            let fov_degrees = camera.fov.to_degrees();
            orbit.update(transform, input, fov_degrees, dt);
        }
    });

    app.run()
}
