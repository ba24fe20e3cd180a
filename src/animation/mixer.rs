use crate::animation::action::AnimationAction;
use crate::animation::clip::{TargetProperty, TrackValue};
use crate::scene::Scene;

/// Drives a set of actions and writes their sampled values into the scene.
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
    pub time_scale: f32,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            time_scale: 1.0,
        }
    }

    pub fn add_action(&mut self, action: AnimationAction) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut [AnimationAction] {
        &mut self.actions
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Advances all actions by `dt` and applies the sampled transforms.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        let dt = dt * self.time_scale;

        for action in &mut self.actions {
            action.update(dt);
        }

        for action in &mut self.actions {
            if action.paused || !action.enabled || action.weight <= 0.0 {
                continue;
            }

            // Bindings are copied out so the action can be borrowed mutably
            // for cursor updates while sampling.
            for i in 0..action.bindings.len() {
                let binding = action.bindings[i];
                let Some(value) = action.sample_track(binding.track_index) else {
                    continue;
                };

                let Some(node) = scene.get_node_mut(binding.node) else {
                    continue;
                };

                match (value, binding.target) {
                    (TrackValue::Vector3(v), TargetProperty::Translation) => {
                        node.transform.position = v;
                        node.transform.mark_dirty();
                    }
                    (TrackValue::Vector3(v), TargetProperty::Scale) => {
                        node.transform.scale = v;
                        node.transform.mark_dirty();
                    }
                    (TrackValue::Quaternion(q), TargetProperty::Rotation) => {
                        node.transform.rotation = q;
                        node.transform.mark_dirty();
                    }
                    _ => {}
                }
            }
        }
    }
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self::new()
    }
}
