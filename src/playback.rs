//! Animation playback lifecycle.
//!
//! Animation data is loaded lazily: nothing is fetched until the user first
//! requests playback. [`PlaybackController`] tracks that lifecycle as an
//! explicit state machine so that a second play request while a load is in
//! flight can never start a duplicate load, and a play request after the
//! clips arrived restarts them instead.
//!
//! The controller does not perform I/O itself. [`trigger_play`] tells the
//! caller whether to start a load; the caller runs the fetch however it likes
//! and hands the outcome to [`complete_load`].
//!
//! [`trigger_play`]: PlaybackController::trigger_play
//! [`complete_load`]: PlaybackController::complete_load

use std::sync::Arc;

use crate::animation::{AnimationAction, AnimationClip, AnimationMixer, Binder};
use crate::errors::ViewerError;
use crate::scene::{NodeHandle, Scene};

/// Lifecycle of the lazily-loaded animation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationLoadState {
    /// No clips loaded and no load running.
    Unloaded,
    /// A load was started and its result has not arrived yet.
    Loading,
    /// Clips are bound to the scene and playable.
    Ready,
}

/// What a play request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The caller must start fetching the animation set now.
    LoadStarted,
    /// A load is already running; nothing to do.
    LoadInFlight,
    /// Clips were already loaded and have been restarted from time zero.
    Restarted,
}

/// Owns the animation mixer for one model and gates when it gets populated.
pub struct PlaybackController {
    root: NodeHandle,
    animation_uri: String,
    state: AnimationLoadState,
    mixer: Option<AnimationMixer>,
}

impl PlaybackController {
    /// `root` is the model subtree the clips will be bound against;
    /// `animation_uri` is the asset the caller should fetch when a load
    /// starts.
    #[must_use]
    pub fn new(root: NodeHandle, animation_uri: impl Into<String>) -> Self {
        Self {
            root,
            animation_uri: animation_uri.into(),
            state: AnimationLoadState::Unloaded,
            mixer: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> AnimationLoadState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn animation_uri(&self) -> &str {
        &self.animation_uri
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[must_use]
    pub fn action_count(&self) -> usize {
        self.mixer.as_ref().map_or(0, AnimationMixer::len)
    }

    #[must_use]
    pub fn mixer(&self) -> Option<&AnimationMixer> {
        self.mixer.as_ref()
    }

    /// Handles a play request.
    ///
    /// The state moves to `Loading` before this returns, so a second request
    /// arriving before the load finishes sees `Loading` and is absorbed.
    pub fn trigger_play(&mut self) -> PlayOutcome {
        match self.state {
            AnimationLoadState::Unloaded => {
                self.state = AnimationLoadState::Loading;
                log::info!("starting animation load from '{}'", self.animation_uri);
                PlayOutcome::LoadStarted
            }
            AnimationLoadState::Loading => {
                log::debug!("play requested while animation load in flight, ignoring");
                PlayOutcome::LoadInFlight
            }
            AnimationLoadState::Ready => {
                self.restart_all();
                PlayOutcome::Restarted
            }
        }
    }

    /// Delivers the outcome of a load started by [`trigger_play`].
    ///
    /// On success the clips are bound to the scene, the mixer is populated
    /// exactly once, and playback starts from time zero. On failure the
    /// controller returns to `Unloaded` so the next play request retries.
    ///
    /// [`trigger_play`]: PlaybackController::trigger_play
    pub fn complete_load(
        &mut self,
        scene: &mut Scene,
        result: Result<Vec<AnimationClip>, ViewerError>,
    ) {
        if self.state == AnimationLoadState::Ready {
            // A duplicate result must never repopulate the mixer
            log::warn!("animation load result arrived after clips were ready, ignoring");
            return;
        }

        match result {
            Ok(clips) => {
                let mut mixer = AnimationMixer::new();
                for clip in clips {
                    let clip = Arc::new(clip);
                    let bindings = Binder::bind(scene, self.root, &clip);
                    let mut action = AnimationAction::new(clip);
                    action.bindings = bindings;
                    mixer.add_action(action);
                }
                log::info!(
                    "animation set '{}' ready with {} clip(s)",
                    self.animation_uri,
                    mixer.len()
                );
                self.mixer = Some(mixer);
                self.state = AnimationLoadState::Ready;
                self.restart_all();
            }
            Err(err) => {
                log::error!("animation load from '{}' failed: {err}", self.animation_uri);
                self.state = AnimationLoadState::Unloaded;
            }
        }
    }

    /// Advances playback. A no-op until the mixer exists; a negative `dt`
    /// (clock hiccup) is treated as zero rather than rewinding.
    pub fn per_frame_update(&mut self, scene: &mut Scene, dt: f32) {
        let dt = dt.max(0.0);
        if let Some(mixer) = &mut self.mixer {
            mixer.update(dt, scene);
        }
    }

    fn restart_all(&mut self) {
        if let Some(mixer) = &mut self.mixer {
            for action in mixer.actions_mut() {
                action.reset();
                action.play();
            }
        }
    }
}
