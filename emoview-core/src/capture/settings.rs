use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::{
    capture::host::TargetDesc,
    foundation::{
        core::Rgb8,
        error::{EmoviewError, EmoviewResult},
    },
};

/// Tunables for a capture run.
///
/// Every field has a default, so a settings file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureSettings {
    /// Square output size in pixels. Values below [`Self::MIN_RESOLUTION`] are raised to it.
    pub resolution: u32,
    /// Vertical field of view in degrees, exclusive range (0, 180).
    pub vertical_fov_deg: f32,
    /// Near clip plane distance.
    pub near_clip: f32,
    /// Far clip plane distance.
    pub far_clip: f32,
    /// Clear color of the render target.
    pub background: Rgb8,
    /// Multisample count requested from the render target.
    pub msaa_samples: u32,
    /// Suffix appended to the working copy's name.
    pub instance_suffix: String,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            resolution: 1024,
            vertical_fov_deg: 30.0,
            near_clip: 0.01,
            far_clip: 10.0,
            background: Rgb8::gray(0.15),
            msaa_samples: 4,
            instance_suffix: "__EmoViewPreview".to_string(),
        }
    }
}

impl CaptureSettings {
    /// Smallest output size the capture will produce.
    pub const MIN_RESOLUTION: u32 = 256;

    /// Load settings from a JSON file.
    pub fn from_path(path: &Path) -> EmoviewResult<Self> {
        let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| EmoviewError::serde(format!("settings '{}': {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check FOV, resolution, clip planes and multisample count.
    pub fn validate(&self) -> EmoviewResult<()> {
        if self.resolution == 0 {
            return Err(EmoviewError::validation("resolution must be > 0"));
        }
        let fov = self.vertical_fov_deg;
        if !fov.is_finite() || fov <= 0.0 || fov >= 180.0 {
            return Err(EmoviewError::validation(format!(
                "vertical_fov_deg must be within (0, 180), got {fov}"
            )));
        }
        if !(self.near_clip > 0.0 && self.far_clip > self.near_clip) {
            return Err(EmoviewError::validation(
                "clip planes must satisfy 0 < near_clip < far_clip",
            ));
        }
        if !matches!(self.msaa_samples, 1 | 2 | 4 | 8) {
            return Err(EmoviewError::validation(format!(
                "msaa_samples must be 1, 2, 4 or 8, got {}",
                self.msaa_samples
            )));
        }
        Ok(())
    }

    /// Output side length after the minimum is applied.
    pub fn effective_resolution(&self) -> u32 {
        self.resolution.max(Self::MIN_RESOLUTION)
    }

    /// Render target description for these settings.
    pub fn target_desc(&self) -> TargetDesc {
        let side = self.effective_resolution();
        TargetDesc {
            width: side,
            height: side,
            depth_bits: 16,
            msaa_samples: self.msaa_samples,
            background: self.background,
            near_clip: self.near_clip,
            far_clip: self.far_clip,
            vertical_fov_deg: self.vertical_fov_deg,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/settings.rs"]
mod tests;
