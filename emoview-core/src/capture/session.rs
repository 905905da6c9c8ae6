use std::path::PathBuf;

use crate::{
    capture::{
        host::CaptureHost,
        log::CaptureLog,
        output::write_preview_png,
        scoped::Scoped,
        settings::CaptureSettings,
        step::{CaptureStep, ClipRun},
    },
    clips::library::{ClipEntry, ClipLibrary},
    foundation::{
        core::ClipDesc,
        error::{EmoviewError, EmoviewResult},
    },
    framing::face::{FaceFraming, auto_frame},
};

/// Sample time and camera placement computed for one clip.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ClipPlan {
    /// Clip name.
    pub name: String,
    /// Timing metadata the plan was computed from.
    pub clip: ClipDesc,
    /// Representative sample time in seconds.
    pub sample_time_s: f32,
    /// Face framing of the posed working copy.
    pub framing: FaceFraming,
}

/// A clip whose preview image was written.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CapturedClip {
    /// Geometry used for the capture.
    pub plan: ClipPlan,
    /// Written PNG path.
    pub path: PathBuf,
}

/// A clip that was logged and skipped.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SkippedClip {
    /// Clip name.
    pub name: String,
    /// Human-readable failure.
    pub reason: String,
    /// Last protocol step the clip completed.
    pub reached: CaptureStep,
}

/// Outcome of a capture run.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct CaptureReport {
    /// Clips written, in processing order.
    pub captured: Vec<CapturedClip>,
    /// Clips skipped, in processing order.
    pub skipped: Vec<SkippedClip>,
}

/// Working copy of the avatar plus the root-motion state to restore.
struct WorkingCopy<I> {
    instance: I,
    prev_root_motion: Option<bool>,
}

fn release_working<H: CaptureHost>(host: &mut H, copy: &WorkingCopy<H::Instance>) {
    if let Some(prev) = copy.prev_root_motion {
        host.set_root_motion(&copy.instance, prev);
    }
    host.destroy_instance(&copy.instance);
}

fn release_target<H: CaptureHost>(host: &mut H, target: &H::Target) {
    host.release_target(target);
}

fn restore_source_visibility<H: CaptureHost>(host: &mut H, was_visible: &bool) {
    if *was_visible {
        host.set_source_visible(true);
    }
}

fn end_sampling<H: CaptureHost>(host: &mut H, _: &()) {
    host.end_sampling();
}

/// Sequential per-clip capture loop.
///
/// Each clip is loaded, posed on a fresh working copy at its representative time,
/// framed, rendered and written as `<out_dir>/<name>.png`. Clip-level failures are
/// logged and skipped; every host resource is released whatever the outcome.
pub struct CaptureSession {
    settings: CaptureSettings,
    out_dir: PathBuf,
    log: CaptureLog,
}

impl CaptureSession {
    /// Validate `settings` and prepare a session writing into `out_dir`.
    pub fn new(settings: CaptureSettings, out_dir: impl Into<PathBuf>) -> EmoviewResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            out_dir: out_dir.into(),
            log: CaptureLog::new(),
        })
    }

    /// Messages recorded so far, newest first.
    pub fn log(&self) -> &CaptureLog {
        &self.log
    }

    /// Capture every clip in `clips` and write one PNG per clip.
    #[tracing::instrument(skip_all, fields(clips = clips.len(), out_dir = %self.out_dir.display()))]
    pub fn run<H: CaptureHost>(
        &mut self,
        host: &mut H,
        clips: &ClipLibrary,
    ) -> EmoviewResult<CaptureReport> {
        if clips.is_empty() {
            return Err(EmoviewError::validation("no clips to capture"));
        }

        let was_visible = host.set_source_visible(false);
        let mut source = Scoped::new(host, was_visible, restore_source_visibility::<H>);

        let desc = self.settings.target_desc();
        let target = source.host().create_target(&desc)?;
        let mut target = Scoped::new(source.host(), target, release_target::<H>);

        let mut report = CaptureReport::default();
        for entry in clips.iter() {
            let (host, rt) = target.parts();
            let mut run = ClipRun::new(&entry.name);
            match self.capture_clip(host, rt, &entry, &mut run) {
                Ok(captured) => {
                    self.log.log(format!("saved: {}", captured.path.display()));
                    report.captured.push(captured);
                }
                Err(err) => {
                    self.log.log(format!("skipped {}: {err}", entry.name));
                    report.skipped.push(SkippedClip {
                        name: entry.name.clone(),
                        reason: err.to_string(),
                        reached: run.step(),
                    });
                }
            }
        }

        drop(target);
        drop(source);
        self.log.log(format!(
            "done: {} captured, {} skipped",
            report.captured.len(),
            report.skipped.len()
        ));
        Ok(report)
    }

    /// Compute sample times and framings without rendering anything.
    #[tracing::instrument(skip_all, fields(clips = clips.len()))]
    pub fn plan<H: CaptureHost>(
        &mut self,
        host: &mut H,
        clips: &ClipLibrary,
    ) -> EmoviewResult<Vec<ClipPlan>> {
        let mut plans = Vec::with_capacity(clips.len());
        for entry in clips.iter() {
            let mut run = ClipRun::new(&entry.name);
            match self.plan_clip(host, &entry, &mut run) {
                Ok(plan) => plans.push(plan),
                Err(err) => self.log.log(format!("skipped {}: {err}", entry.name)),
            }
        }
        Ok(plans)
    }

    fn plan_clip<H: CaptureHost>(
        &mut self,
        host: &mut H,
        entry: &ClipEntry,
        run: &mut ClipRun,
    ) -> EmoviewResult<ClipPlan> {
        let clip = host.load_clip(entry)?;

        let mut working = self.duplicate(host)?;
        let (host, copy) = working.parts();
        host.begin_sampling();
        let mut sampling = Scoped::new(host, (), end_sampling::<H>);

        let plan = self.pose_and_frame(sampling.host(), &copy.instance, entry, clip, run)?;
        Ok(plan)
    }

    fn capture_clip<H: CaptureHost>(
        &mut self,
        host: &mut H,
        target: &H::Target,
        entry: &ClipEntry,
        run: &mut ClipRun,
    ) -> EmoviewResult<CapturedClip> {
        let clip = host.load_clip(entry)?;

        let mut working = self.duplicate(host)?;
        let (host, copy) = working.parts();
        self.log.log(format!("capturing: {}", entry.name));

        // The sampled pose only holds while sampling mode is active, so render inside it.
        host.begin_sampling();
        let mut sampling = Scoped::new(host, (), end_sampling::<H>);
        let plan = self.pose_and_frame(sampling.host(), &copy.instance, entry, clip, run)?;
        let image = sampling.host().render(target, &plan.framing.camera)?;
        run.advance(CaptureStep::Captured)?;
        drop(sampling);

        let path = write_preview_png(&self.out_dir, &entry.name, &image)?;

        drop(working);
        run.advance(CaptureStep::Restored)?;
        Ok(CapturedClip { plan, path })
    }

    fn duplicate<'h, H: CaptureHost>(
        &self,
        host: &'h mut H,
    ) -> EmoviewResult<Scoped<'h, H, WorkingCopy<H::Instance>>> {
        let instance = host.duplicate_avatar(&self.settings.instance_suffix)?;
        let prev_root_motion = host.set_root_motion(&instance, false);
        Ok(Scoped::new(
            host,
            WorkingCopy {
                instance,
                prev_root_motion,
            },
            release_working::<H>,
        ))
    }

    /// Pose `instance` at the clip's representative time, let the host apply it,
    /// then frame the face. The host must already be in sampling mode.
    fn pose_and_frame<H: CaptureHost>(
        &mut self,
        host: &mut H,
        instance: &H::Instance,
        entry: &ClipEntry,
        clip: ClipDesc,
        run: &mut ClipRun,
    ) -> EmoviewResult<ClipPlan> {
        let sample_time_s = clip.representative_time();
        host.apply_pose(instance, entry, &clip, sample_time_s)?;
        run.advance(CaptureStep::PoseApplied)?;

        host.advance_frame();
        run.advance(CaptureStep::FrameAdvanced)?;

        let landmarks = host.landmarks(instance);
        if landmarks.present() == 0 {
            tracing::warn!(clip = %entry.name, "no face landmarks, framing on the view position");
            self.log
                .log(format!("{}: no face landmarks, using view position", entry.name));
        }
        let framing = auto_frame(
            &landmarks,
            &host.reference_view(),
            self.settings.vertical_fov_deg,
        );
        tracing::debug!(
            clip = %entry.name,
            sample_time_s,
            radius = framing.radius,
            distance = framing.distance,
            "framed"
        );

        Ok(ClipPlan {
            name: entry.name.clone(),
            clip,
            sample_time_s,
            framing,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
