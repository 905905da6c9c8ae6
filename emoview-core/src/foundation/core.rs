pub use glam::{Quat, Vec3};

/// Timing metadata of one animation clip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipDesc {
    /// Clip length in seconds.
    pub duration_s: f32,
    /// Whether the clip is authored to loop.
    pub looping: bool,
    /// Authored sample rate in frames per second.
    pub frame_rate: f32,
}

impl ClipDesc {
    /// Clip metadata; negative durations are clamped to 0.
    pub fn new(duration_s: f32, looping: bool, frame_rate: f32) -> Self {
        Self {
            duration_s: duration_s.max(0.0),
            looping,
            frame_rate,
        }
    }
}

/// Opaque RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniform gray from a unit intensity, rounded to nearest.
    pub fn gray(v: f32) -> Self {
        let c = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(c, c, c)
    }

    /// Convert to an `image` pixel.
    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
