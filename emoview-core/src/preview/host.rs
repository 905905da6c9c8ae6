use std::collections::BTreeMap;

use image::RgbImage;

use crate::{
    capture::host::{CaptureHost, TargetDesc},
    clips::{anim::load_anim, library::ClipEntry},
    foundation::{
        core::{ClipDesc, Rgb8},
        error::{EmoviewError, EmoviewResult},
    },
    framing::face::{CameraPose, LandmarkSet, ReferenceView},
    preview::{
        raster::{Disc, rasterize},
        rig::Rig,
    },
};

const HEAD_RADIUS: f32 = 0.09;
const EYE_RADIUS: f32 = 0.012;
const SKIN: Rgb8 = Rgb8::new(236, 204, 184);
const EYE: Rgb8 = Rgb8::new(46, 52, 82);

/// Render target handle issued by [`PreviewHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreviewTarget(u64);

/// Working-copy handle issued by [`PreviewHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreviewInstance(u64);

#[derive(Clone, Debug)]
struct InstanceState {
    name: String,
    root_motion: bool,
    pending: Option<LandmarkSet>,
    posed: LandmarkSet,
}

/// Software stand-in for an engine: a rig of landmark spheres drawn as discs.
///
/// Poses requested with `apply_pose` only become visible after `advance_frame`, and
/// the source avatar is drawn in its rest pose while visible.
#[derive(Debug)]
pub struct PreviewHost {
    rig: Rig,
    source_visible: bool,
    source_root_motion: bool,
    sampling: bool,
    frames: u64,
    next_id: u64,
    instances: BTreeMap<u64, InstanceState>,
    targets: BTreeMap<u64, TargetDesc>,
}

impl PreviewHost {
    /// Host for `rig` with the source avatar visible.
    pub fn new(rig: Rig) -> Self {
        Self {
            rig,
            source_visible: true,
            source_root_motion: true,
            sampling: false,
            frames: 0,
            next_id: 0,
            instances: BTreeMap::new(),
            targets: BTreeMap::new(),
        }
    }

    /// The rig being rendered.
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Whether the source avatar is drawn.
    pub fn is_source_visible(&self) -> bool {
        self.source_visible
    }

    /// Whether sampling mode is active.
    pub fn is_sampling(&self) -> bool {
        self.sampling
    }

    /// Number of `advance_frame` calls so far.
    pub fn frames_advanced(&self) -> u64 {
        self.frames
    }

    /// Working copies not yet destroyed.
    pub fn live_instances(&self) -> usize {
        self.instances.len()
    }

    /// Render targets not yet released.
    pub fn live_targets(&self) -> usize {
        self.targets.len()
    }

    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn instance(&self, instance: &PreviewInstance) -> EmoviewResult<&InstanceState> {
        self.instances
            .get(&instance.0)
            .ok_or_else(|| EmoviewError::capture(format!("unknown instance {}", instance.0)))
    }

    fn discs(landmarks: &LandmarkSet, out: &mut Vec<Disc>) {
        if let Some(head) = &landmarks.head {
            out.push(Disc {
                center: head.position,
                radius: HEAD_RADIUS,
                color: SKIN,
            });
        }
        for eye in [&landmarks.left_eye, &landmarks.right_eye].into_iter().flatten() {
            out.push(Disc {
                center: eye.position,
                radius: EYE_RADIUS,
                color: EYE,
            });
        }
    }
}

impl CaptureHost for PreviewHost {
    type Target = PreviewTarget;
    type Instance = PreviewInstance;

    fn load_clip(&mut self, entry: &ClipEntry) -> EmoviewResult<ClipDesc> {
        load_anim(&entry.path)
    }

    fn reference_view(&self) -> ReferenceView {
        self.rig.reference_view()
    }

    fn set_source_visible(&mut self, visible: bool) -> bool {
        std::mem::replace(&mut self.source_visible, visible)
    }

    fn create_target(&mut self, desc: &TargetDesc) -> EmoviewResult<PreviewTarget> {
        if desc.width == 0 || desc.height == 0 {
            return Err(EmoviewError::capture("render target must be non-empty"));
        }
        let id = self.alloc_id();
        self.targets.insert(id, *desc);
        tracing::debug!(id, width = desc.width, height = desc.height, "render target created");
        Ok(PreviewTarget(id))
    }

    fn release_target(&mut self, target: &PreviewTarget) {
        if self.targets.remove(&target.0).is_none() {
            tracing::warn!(id = target.0, "release of unknown render target");
        }
    }

    fn duplicate_avatar(&mut self, name_suffix: &str) -> EmoviewResult<PreviewInstance> {
        let id = self.alloc_id();
        let state = InstanceState {
            name: format!("{}{name_suffix}", self.rig.name),
            root_motion: self.source_root_motion,
            pending: None,
            posed: self.rig.landmarks,
        };
        tracing::debug!(id, name = %state.name, "working copy created");
        self.instances.insert(id, state);
        Ok(PreviewInstance(id))
    }

    fn destroy_instance(&mut self, instance: &PreviewInstance) {
        match self.instances.remove(&instance.0) {
            Some(state) => tracing::debug!(id = instance.0, name = %state.name, "working copy destroyed"),
            None => tracing::warn!(id = instance.0, "destroy of unknown instance"),
        }
    }

    fn set_root_motion(&mut self, instance: &PreviewInstance, enabled: bool) -> Option<bool> {
        if !self.rig.has_animator {
            return None;
        }
        let state = self.instances.get_mut(&instance.0)?;
        Some(std::mem::replace(&mut state.root_motion, enabled))
    }

    fn begin_sampling(&mut self) {
        self.sampling = true;
    }

    fn end_sampling(&mut self) {
        self.sampling = false;
        // Leaving sampling mode reverts every sampled pose.
        for state in self.instances.values_mut() {
            state.pending = None;
            state.posed = self.rig.landmarks;
        }
    }

    fn apply_pose(
        &mut self,
        instance: &PreviewInstance,
        entry: &ClipEntry,
        clip: &ClipDesc,
        time_s: f32,
    ) -> EmoviewResult<()> {
        if !self.sampling {
            return Err(EmoviewError::capture("apply_pose outside sampling mode"));
        }
        let progress = if clip.duration_s > 0.0 {
            time_s / clip.duration_s
        } else {
            0.0
        };
        let posed = self.rig.posed_landmarks(&entry.name, progress);
        let state = self
            .instances
            .get_mut(&instance.0)
            .ok_or_else(|| EmoviewError::capture(format!("unknown instance {}", instance.0)))?;
        state.pending = Some(posed);
        Ok(())
    }

    fn advance_frame(&mut self) {
        self.frames += 1;
        for state in self.instances.values_mut() {
            if let Some(posed) = state.pending.take() {
                state.posed = posed;
            }
        }
    }

    fn landmarks(&self, instance: &PreviewInstance) -> LandmarkSet {
        self.instance(instance)
            .map(|s| s.posed)
            .unwrap_or_default()
    }

    fn render(&mut self, target: &PreviewTarget, camera: &CameraPose) -> EmoviewResult<RgbImage> {
        let desc = self
            .targets
            .get(&target.0)
            .ok_or_else(|| EmoviewError::capture(format!("unknown render target {}", target.0)))?;

        let mut discs = Vec::new();
        if self.source_visible {
            Self::discs(&self.rig.landmarks, &mut discs);
        }
        for state in self.instances.values() {
            Self::discs(&state.posed, &mut discs);
        }
        Ok(rasterize(desc, camera, &discs))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/host.rs"]
mod tests;
