//! Keyframe animation runtime.
//!
//! The pipeline runs in three stages:
//! 1. [`AnimationClip`]s hold immutable keyframe tracks addressed by node
//!    name.
//! 2. [`Binder`] resolves track names to [`NodeHandle`]s once, producing
//!    [`PropertyBinding`]s stored on each [`AnimationAction`].
//! 3. [`AnimationMixer::update`] advances the actions each frame and writes
//!    the sampled translation/rotation/scale values into the scene.
//!
//! [`NodeHandle`]: crate::scene::NodeHandle

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, LoopMode};
pub use binder::Binder;
pub use binding::PropertyBinding;
pub use clip::{AnimationClip, TargetProperty, Track, TrackData, TrackValue};
pub use mixer::AnimationMixer;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
