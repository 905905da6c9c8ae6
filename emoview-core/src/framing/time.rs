use crate::foundation::core::ClipDesc;

/// Durations at or below this are treated as empty clips.
pub const DURATION_EPSILON: f32 = 1e-5;

/// Lowest frame rate assumed when backing off from the end of a clip.
pub const MIN_BACKOFF_FPS: f32 = 30.0;

/// Pick the single sample time that best depicts a clip's held pose.
///
/// - empty clips sample at 0;
/// - looping clips sample the midpoint, away from the loop seam;
/// - one-shot clips sample one frame before the end, since the final frame is often
///   a transition back to rest. Frame rates below 30 (or invalid) count as 30.
pub fn representative_time(duration_s: f32, looping: bool, frame_rate: f32) -> f32 {
    if duration_s.is_nan() || duration_s <= DURATION_EPSILON {
        return 0.0;
    }

    if looping {
        return duration_s * 0.5;
    }

    let fps = if frame_rate.is_finite() {
        frame_rate.max(MIN_BACKOFF_FPS)
    } else {
        MIN_BACKOFF_FPS
    };
    (duration_s - 1.0 / fps).max(0.0)
}

impl ClipDesc {
    /// [`representative_time`] for this clip.
    pub fn representative_time(&self) -> f32 {
        representative_time(self.duration_s, self.looping, self.frame_rate)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/framing/time.rs"]
mod tests;
