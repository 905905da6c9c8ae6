use image::RgbImage;

use crate::{
    clips::library::ClipEntry,
    foundation::{
        core::{ClipDesc, Rgb8},
        error::EmoviewResult,
    },
    framing::face::{CameraPose, LandmarkSet, ReferenceView},
};

/// Offscreen render target request.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TargetDesc {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Depth buffer precision.
    pub depth_bits: u32,
    /// Multisample count.
    pub msaa_samples: u32,
    /// Clear color.
    pub background: Rgb8,
    /// Near clip plane distance.
    pub near_clip: f32,
    /// Far clip plane distance.
    pub far_clip: f32,
    /// Vertical field of view in degrees.
    pub vertical_fov_deg: f32,
}

/// Services a capture run needs from the engine that owns the avatar.
///
/// Handles (`Target`, `Instance`) are opaque to the session. Release methods take
/// them by reference; the session guarantees each acquired handle is released
/// exactly once, including on error paths.
pub trait CaptureHost {
    /// Offscreen render target handle.
    type Target;
    /// Handle of a duplicated avatar.
    type Instance;

    /// Resolve clip timing metadata. Errors skip the clip.
    fn load_clip(&mut self, entry: &ClipEntry) -> EmoviewResult<ClipDesc>;

    /// Framing anchor of the source avatar.
    fn reference_view(&self) -> ReferenceView;

    /// Show or hide the source avatar, returning its previous visibility.
    fn set_source_visible(&mut self, visible: bool) -> bool;

    /// Allocate an offscreen render target.
    fn create_target(&mut self, desc: &TargetDesc) -> EmoviewResult<Self::Target>;

    /// Free a target returned by [`CaptureHost::create_target`].
    fn release_target(&mut self, target: &Self::Target);

    /// Duplicate the source avatar into an active working copy.
    fn duplicate_avatar(&mut self, name_suffix: &str) -> EmoviewResult<Self::Instance>;

    /// Destroy a working copy returned by [`CaptureHost::duplicate_avatar`].
    fn destroy_instance(&mut self, instance: &Self::Instance);

    /// Set root motion, returning the previous value, or `None` without an animator.
    fn set_root_motion(&mut self, instance: &Self::Instance, enabled: bool) -> Option<bool>;

    /// Enter the mode in which clips may be sampled onto instances.
    fn begin_sampling(&mut self);

    /// Leave sampling mode. Poses applied inside it revert.
    fn end_sampling(&mut self);

    /// Request `clip` sampled at `time_s` onto `instance`. Takes effect after the
    /// next [`CaptureHost::advance_frame`].
    fn apply_pose(
        &mut self,
        instance: &Self::Instance,
        entry: &ClipEntry,
        clip: &ClipDesc,
        time_s: f32,
    ) -> EmoviewResult<()>;

    /// Let the host run one update so pending changes become visible.
    fn advance_frame(&mut self);

    /// World-space face landmarks of the posed instance.
    fn landmarks(&self, instance: &Self::Instance) -> LandmarkSet;

    /// Render the scene through `camera` into `target` and read the pixels back.
    fn render(&mut self, target: &Self::Target, camera: &CameraPose) -> EmoviewResult<RgbImage>;
}
