use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

/// How many intervals a cursor scans linearly before falling back to a
/// binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Per-track sampling cursor.
///
/// Remembers the last keyframe interval so that sequential playback samples
/// in O(1). Each action owns one cursor per track; the track itself stays
/// shared and immutable.
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// A typed keyframe track.
///
/// For `CubicSpline`, `values` holds three entries per keyframe in the order
/// in-tangent, value, out-tangent, so its length is `times.len() * 3`.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Samples without a cursor, using a binary search.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }
        let index = self.times.partition_point(|&t| t <= time).saturating_sub(1);
        Some(self.sample_at_frame(index, time))
    }

    /// Samples with a cursor: a short linear scan around the last interval,
    /// falling back to a binary search on large jumps (scrubbing, loop
    /// wrap-around).
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.times.len();
        if len == 0 {
            return None;
        }
        if len == 1 {
            return Some(self.get_value_at(0).clone());
        }

        // A stale cursor (clip switched under the action) resets to 0
        let i = cursor.last_index.min(len - 1);
        let t_curr = self.times[i];

        let found_index = if time >= t_curr {
            // Forward scan: check intervals [idx, idx+1) starting at i
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    if time >= self.times[len - 1] {
                        res = Some(len - 1);
                    }
                    break;
                }
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Backward scan for reverse playback
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;
                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let index = match found_index {
            Some(idx) => idx,
            None => self.times.partition_point(|&t| t <= time).saturating_sub(1),
        };
        cursor.last_index = index;

        Some(self.sample_at_frame(index, time))
    }

    /// For Linear/Step the index maps directly; for CubicSpline the value
    /// sits at `index * 3 + 1`.
    fn get_value_at(&self, index: usize) -> &T {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            _ => &self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        // Clamped to the last keyframe past the end of the track
        if index >= len - 1 {
            return self.get_value_at(len - 1).clone();
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => self.get_value_at(index).clone(),
            InterpolationMode::Linear => {
                let v0 = self.get_value_at(index);
                let v1 = self.get_value_at(next_idx);
                T::interpolate_linear(v0, v1, t)
            }
            InterpolationMode::CubicSpline => {
                let i0 = index * 3;
                let i1 = next_idx * 3;

                let v0 = &self.values[i0 + 1];
                let out_tangent0 = &self.values[i0 + 2];
                let in_tangent1 = &self.values[i1];
                let v1 = &self.values[i1 + 1];

                T::interpolate_cubic(v0, out_tangent0, v1, in_tangent1, t, dt)
            }
        }
    }
}
