use crate::animation::clip::TargetProperty;
use crate::scene::NodeHandle;

/// Maps track `track_index` of a clip to a property of a resolved scene node.
#[derive(Debug, Clone, Copy)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub node: NodeHandle,
    pub target: TargetProperty,
}
