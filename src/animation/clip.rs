use glam::{Quat, Vec3};

use crate::animation::tracks::{KeyframeCursor, KeyframeTrack};

/// The node property a track animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetProperty {
    Translation,
    Rotation,
    Scale,
}

/// Typed keyframe data for one track.
#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
    Scalar(KeyframeTrack<f32>),
}

impl TrackData {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            TrackData::Vector3(t) => t.end_time(),
            TrackData::Quaternion(t) => t.end_time(),
            TrackData::Scalar(t) => t.end_time(),
        }
    }

    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<TrackValue> {
        match self {
            TrackData::Vector3(t) => t.sample_with_cursor(time, cursor).map(TrackValue::Vector3),
            TrackData::Quaternion(t) => t
                .sample_with_cursor(time, cursor)
                .map(TrackValue::Quaternion),
            TrackData::Scalar(t) => t.sample_with_cursor(time, cursor).map(TrackValue::Scalar),
        }
    }
}

/// A sampled track value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
    Scalar(f32),
}

/// One animated property of one named node.
#[derive(Debug, Clone)]
pub struct Track {
    /// Name of the node this track targets, resolved at bind time.
    pub node_name: String,
    pub target: TargetProperty,
    pub data: TrackData,
}

/// A named set of tracks sharing a timeline.
///
/// Clips are immutable once loaded and shared between actions via `Arc`.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub tracks: Vec<Track>,
    duration: f32,
}

impl AnimationClip {
    /// Duration is the latest end time across all tracks.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);
        Self {
            name: name.into(),
            tracks,
            duration,
        }
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }
}
