//! Software host used by the CLI: landmark spheres rendered as flat discs.

/// [`crate::CaptureHost`] implementation.
pub mod host;
pub(crate) mod raster;
/// Rig description format.
pub mod rig;
