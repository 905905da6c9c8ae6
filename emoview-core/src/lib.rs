//! EmoView captures one facial-expression preview image per animation clip.
//!
//! For every clip the capture loop:
//!
//! 1. **Selects** a representative sample time ([`representative_time`]): the midpoint of
//!    looping clips, one frame before the end of one-shot clips.
//! 2. **Poses** a duplicated avatar at that time and lets the host advance one frame.
//! 3. **Frames** the face ([`auto_frame`]): the camera backs away from the landmark
//!    center until the bounding sphere fills the vertical field of view.
//! 4. **Renders** offscreen and writes `<clip>.png`.
//!
//! The engine that owns the avatar is abstracted behind [`CaptureHost`]. Host resources
//! (render target, working copy, sampling mode, source visibility) are held by
//! [`Scoped`] guards and released on every exit path. [`PreviewHost`] is a small
//! software host driven by a JSON [`Rig`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod capture;
mod clips;
mod foundation;
mod framing;
mod preview;

pub use capture::host::{CaptureHost, TargetDesc};
pub use capture::log::CaptureLog;
pub use capture::output::{ensure_parent_dir, preview_path, write_preview_png};
pub use capture::scoped::Scoped;
pub use capture::session::{CaptureReport, CaptureSession, CapturedClip, ClipPlan, SkippedClip};
pub use capture::settings::CaptureSettings;
pub use capture::step::{CaptureStep, ClipRun};
pub use clips::anim::{DEFAULT_SAMPLE_RATE, load_anim, parse_anim_header};
pub use clips::library::{CLIP_EXTENSION, ClipEntry, ClipLibrary};
pub use foundation::core::{ClipDesc, Quat, Rgb8, Vec3};
pub use foundation::error::{EmoviewError, EmoviewResult};
pub use framing::face::{
    CameraPose, FRAMING_MARGIN, FaceFraming, Landmark, LandmarkSet, ReferenceView, auto_frame,
    framing_distance,
};
pub use framing::time::{DURATION_EPSILON, MIN_BACKOFF_FPS, representative_time};
pub use preview::host::{PreviewHost, PreviewInstance, PreviewTarget};
pub use preview::rig::{PoseOffsets, Rig};
