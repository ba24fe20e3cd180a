#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! A minimal glTF model viewer.
//!
//! The static model loads at startup; its animation set lives in a separate
//! asset that is only fetched when playback is first requested. The
//! [`PlaybackController`] keeps that lazy load single-flight and replayable.

pub mod animation;
pub mod app;
#[cfg(not(target_arch = "wasm32"))]
pub mod assets;
pub mod errors;
pub mod playback;
pub mod renderer;
pub mod scene;
pub mod utils;

pub use animation::{AnimationAction, AnimationClip, AnimationMixer, Binder, LoopMode};
pub use app::App;
#[cfg(not(target_arch = "wasm32"))]
pub use assets::GltfLoader;
pub use errors::ViewerError;
pub use playback::{AnimationLoadState, PlayOutcome, PlaybackController};
pub use renderer::{RenderSettings, Renderer, WgpuContext};
pub use scene::{Camera, Light, Mesh, Node, Scene};
pub use utils::orbit_control::OrbitControls;
