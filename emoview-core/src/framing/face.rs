use crate::foundation::{
    core::{Quat, Vec3},
    math::look_rotation,
};

/// Padding added around the landmark sphere so the face is never cropped tight.
pub const FRAMING_MARGIN: f32 = 0.06;

/// A posed reference point with its local orientation axes, in world space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Landmark {
    /// World position.
    pub position: Vec3,
    /// Local +Z in world space.
    #[serde(default = "local_forward")]
    pub forward: Vec3,
    /// Local +Y in world space.
    #[serde(default = "world_up")]
    pub up: Vec3,
}

fn local_forward() -> Vec3 {
    Vec3::Z
}

impl Landmark {
    /// Landmark at `position` with the default axes (+Z forward, +Y up).
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            forward: Vec3::Z,
            up: Vec3::Y,
        }
    }
}

/// Face landmarks of a posed avatar. Any slot may be missing on a given rig.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LandmarkSet {
    /// Head bone. Its axes orient the camera when present.
    #[serde(default)]
    pub head: Option<Landmark>,
    /// Left eye bone.
    #[serde(default)]
    pub left_eye: Option<Landmark>,
    /// Right eye bone.
    #[serde(default)]
    pub right_eye: Option<Landmark>,
}

impl LandmarkSet {
    /// Present landmarks in slot order (head, left eye, right eye).
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        [&self.head, &self.left_eye, &self.right_eye]
            .into_iter()
            .flatten()
    }

    /// Number of present landmarks.
    pub fn present(&self) -> usize {
        self.iter().count()
    }
}

/// Avatar-level framing anchor used when landmarks are missing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceView {
    /// World-space view position of the avatar.
    pub position: Vec3,
    /// Avatar forward direction.
    pub forward: Vec3,
    /// Roll reference, normally world up.
    #[serde(default = "world_up")]
    pub up: Vec3,
}

fn world_up() -> Vec3 {
    Vec3::Y
}

/// Camera placement produced by [`auto_frame`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraPose {
    /// World position of the eye point.
    pub position: Vec3,
    /// Unit direction the camera looks along (zero if placed on its target).
    pub look_dir: Vec3,
    /// Roll reference used to build `rotation`.
    pub up: Vec3,
    /// Rotation mapping camera-local +Z to `look_dir`.
    pub rotation: Quat,
}

impl CameraPose {
    /// Transform a world-space point into camera-local coordinates (+Z in front).
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }
}

/// Full result of auto-framing, intermediate geometry included.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FaceFraming {
    /// Unweighted mean of the reference anchor and all present landmarks.
    pub center: Vec3,
    /// Bounding radius around `center`, margin included.
    pub radius: f32,
    /// Distance from `center` to the camera.
    pub distance: f32,
    /// Resulting camera placement.
    pub camera: CameraPose,
}

/// Distance at which a sphere of `radius` exactly fills a vertical field of view.
pub fn framing_distance(radius: f32, vertical_fov_deg: f32) -> f32 {
    radius / (vertical_fov_deg.to_radians() * 0.5).tan()
}

/// Place a camera in front of the face so every landmark fits in the vertical FOV.
///
/// The reference anchor always contributes one unit of weight to the center, so with
/// no landmarks the framing degrades to the anchor with a margin-sized sphere.
pub fn auto_frame(
    landmarks: &LandmarkSet,
    fallback: &ReferenceView,
    vertical_fov_deg: f32,
) -> FaceFraming {
    let mut sum = fallback.position;
    let mut count = 1.0_f32;
    for lm in landmarks.iter() {
        sum += lm.position;
        count += 1.0;
    }
    let center = sum / count;

    let radius = landmarks
        .iter()
        .map(|lm| center.distance(lm.position))
        .fold(0.0_f32, f32::max)
        + FRAMING_MARGIN;

    let (forward, up) = match &landmarks.head {
        Some(head) => (head.forward, head.up),
        None => (fallback.forward, fallback.up),
    };

    let distance = framing_distance(radius, vertical_fov_deg);
    let position = center + forward * distance;
    let look = center - position;

    FaceFraming {
        center,
        radius,
        distance,
        camera: CameraPose {
            position,
            look_dir: look.normalize_or_zero(),
            up,
            rotation: look_rotation(look, up),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/framing/face.rs"]
mod tests;
