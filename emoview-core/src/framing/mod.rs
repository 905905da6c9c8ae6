//! Closed-form geometry: which instant of a clip to sample, and where to put the camera.

/// Face auto-framing.
pub mod face;
/// Representative sample time selection.
pub mod time;
