use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

/// Resolves a clip's named tracks to concrete node handles.
pub struct Binder;

impl Binder {
    /// Searches the subtree under `root` for each track's target node.
    ///
    /// Tracks whose node name does not appear in the subtree are silently
    /// skipped; the returned bindings only cover resolvable tracks.
    #[must_use]
    pub fn bind(scene: &Scene, root: NodeHandle, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            if let Some(node) = scene.find_by_name(root, &track.node_name) {
                bindings.push(PropertyBinding {
                    track_index,
                    node,
                    target: track.target,
                });
            } else {
                log::debug!(
                    "animation track '{}' targets unknown node '{}', skipping",
                    clip.name,
                    track.node_name
                );
            }
        }

        bindings
    }
}
