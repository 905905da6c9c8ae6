use crate::foundation::error::{EmoviewError, EmoviewResult};

/// Progress of one clip through the capture protocol.
///
/// `Idle -> PoseApplied -> FrameAdvanced -> Captured -> Restored`. The frame advance
/// sits between posing and reading landmarks so the host has applied the pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum CaptureStep {
    /// Nothing done yet.
    Idle,
    /// Pose requested on the working copy.
    PoseApplied,
    /// Host ran one update; landmarks reflect the pose.
    FrameAdvanced,
    /// Image rendered and read back.
    Captured,
    /// Image written and the working copy released.
    Restored,
}

impl CaptureStep {
    /// Successor step, `None` after [`CaptureStep::Restored`].
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::PoseApplied),
            Self::PoseApplied => Some(Self::FrameAdvanced),
            Self::FrameAdvanced => Some(Self::Captured),
            Self::Captured => Some(Self::Restored),
            Self::Restored => None,
        }
    }
}

/// Step tracker for a single clip.
#[derive(Clone, Debug)]
pub struct ClipRun {
    name: String,
    step: CaptureStep,
}

impl ClipRun {
    /// Tracker for clip `name`, starting at [`CaptureStep::Idle`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            step: CaptureStep::Idle,
        }
    }

    /// Clip name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last step reached.
    pub fn step(&self) -> CaptureStep {
        self.step
    }

    /// Move to `to`, which must be the immediate successor of the current step.
    pub fn advance(&mut self, to: CaptureStep) -> EmoviewResult<()> {
        if self.step.next() != Some(to) {
            return Err(EmoviewError::capture(format!(
                "clip '{}': cannot move from {:?} to {:?}",
                self.name, self.step, to
            )));
        }
        tracing::trace!(clip = %self.name, from = ?self.step, to = ?to, "capture step");
        self.step = to;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/step.rs"]
mod tests;
