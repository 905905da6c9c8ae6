use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::{
    foundation::{
        core::Vec3,
        error::{EmoviewError, EmoviewResult},
    },
    framing::face::{LandmarkSet, ReferenceView},
};

/// Landmark displacements a clip reaches at its end, relative to the rest pose.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoseOffsets {
    /// Head displacement.
    pub head: Option<Vec3>,
    /// Left eye displacement.
    pub left_eye: Option<Vec3>,
    /// Right eye displacement.
    pub right_eye: Option<Vec3>,
}

impl PoseOffsets {
    fn iter(&self) -> impl Iterator<Item = Vec3> {
        [self.head, self.left_eye, self.right_eye].into_iter().flatten()
    }
}

/// Avatar description consumed by the preview host.
///
/// ```json
/// {
///   "name": "avatar",
///   "view_position": [0.0, 1.52, 0.08],
///   "forward": [0.0, 0.0, 1.0],
///   "landmarks": {
///     "head": { "position": [0.0, 1.5, 0.0] },
///     "left_eye": { "position": [-0.032, 1.56, 0.07] }
///   },
///   "poses": { "smile": { "head": [0.0, 0.01, 0.0] } }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rig {
    /// Display name used in diagnostics.
    #[serde(default = "default_name")]
    pub name: String,
    /// World-space view position of the avatar.
    pub view_position: Vec3,
    /// Avatar forward direction.
    #[serde(default = "default_forward")]
    pub forward: Vec3,
    /// Roll reference, normally world up.
    #[serde(default = "default_up")]
    pub up: Vec3,
    /// Whether the avatar carries an animator (root motion can be toggled).
    #[serde(default = "default_true")]
    pub has_animator: bool,
    /// Rest-pose landmarks.
    #[serde(default)]
    pub landmarks: LandmarkSet,
    /// Per-clip landmark offsets keyed by clip name.
    #[serde(default)]
    pub poses: BTreeMap<String, PoseOffsets>,
}

fn default_name() -> String {
    "avatar".to_string()
}

fn default_forward() -> Vec3 {
    Vec3::Z
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_true() -> bool {
    true
}

fn parallel(forward: Vec3, up: Vec3) -> bool {
    forward.cross(up).length_squared() < 1e-12
}

impl Rig {
    /// Load and validate a rig from a JSON file.
    pub fn from_path(path: &Path) -> EmoviewResult<Self> {
        let f = File::open(path).with_context(|| format!("open rig '{}'", path.display()))?;
        let rig: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| EmoviewError::serde(format!("rig '{}': {e}", path.display())))?;
        rig.validate()?;
        Ok(rig)
    }

    /// Reject rigs whose coordinates are non-finite or whose camera axes are parallel.
    ///
    /// The head landmark's axes orient the camera whenever the head is present, so
    /// they are held to the same rule as the avatar's own forward/up pair.
    pub fn validate(&self) -> EmoviewResult<()> {
        let mut points = vec![self.view_position, self.forward, self.up];
        for lm in self.landmarks.iter() {
            points.extend([lm.position, lm.forward, lm.up]);
        }
        if !points.iter().all(|p| p.is_finite()) {
            return Err(EmoviewError::validation(format!(
                "rig '{}' has non-finite coordinates",
                self.name
            )));
        }
        if parallel(self.forward, self.up) {
            return Err(EmoviewError::validation(format!(
                "rig '{}': forward and up must not be parallel",
                self.name
            )));
        }
        if let Some(head) = &self.landmarks.head
            && parallel(head.forward, head.up)
        {
            return Err(EmoviewError::validation(format!(
                "rig '{}': head forward and up must not be parallel",
                self.name
            )));
        }
        if let Some((clip, _)) = self
            .poses
            .iter()
            .find(|(_, offsets)| !offsets.iter().all(|d| d.is_finite()))
        {
            return Err(EmoviewError::validation(format!(
                "rig '{}': pose '{clip}' has non-finite offsets",
                self.name
            )));
        }
        Ok(())
    }

    /// Framing anchor taken from the rig's view position and axes.
    pub fn reference_view(&self) -> ReferenceView {
        ReferenceView {
            position: self.view_position,
            forward: self.forward,
            up: self.up,
        }
    }

    /// Landmarks after sampling `clip` at `progress` (0 = rest, 1 = clip end).
    pub fn posed_landmarks(&self, clip: &str, progress: f32) -> LandmarkSet {
        let mut set = self.landmarks;
        let Some(offsets) = self.poses.get(clip) else {
            return set;
        };
        let k = progress.clamp(0.0, 1.0);
        for (slot, delta) in [
            (&mut set.head, offsets.head),
            (&mut set.left_eye, offsets.left_eye),
            (&mut set.right_eye, offsets.right_eye),
        ] {
            if let (Some(lm), Some(d)) = (slot.as_mut(), delta) {
                lm.position += d * k;
            }
        }
        set
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/rig.rs"]
mod tests;
