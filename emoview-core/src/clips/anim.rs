use std::path::Path;

use anyhow::Context;

use crate::foundation::{
    core::ClipDesc,
    error::{EmoviewError, EmoviewResult},
};

/// Sample rate assumed when a clip file does not declare one.
pub const DEFAULT_SAMPLE_RATE: f32 = 60.0;

/// Read timing metadata from a serialized animation clip file.
pub fn load_anim(path: &Path) -> EmoviewResult<ClipDesc> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read clip '{}'", path.display()))?;
    parse_anim_header(&text)
        .map_err(|e| EmoviewError::clip(format!("'{}': {e}", path.display())))
}

/// Extract duration, loop flag and sample rate from the YAML text of an
/// `AnimationClip` asset.
///
/// Only flat `key: value` lines are inspected; the first occurrence of each key
/// wins. Curve data, tags and unknown keys are ignored.
pub fn parse_anim_header(text: &str) -> EmoviewResult<ClipDesc> {
    let mut is_clip = false;
    let mut sample_rate: Option<f32> = None;
    let mut start: Option<f32> = None;
    let mut stop: Option<f32> = None;
    let mut loop_time: Option<bool> = None;

    for (idx, line) in text.lines().enumerate() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let value = value.trim();
        let line_no = idx + 1;
        match key.trim() {
            "AnimationClip" => is_clip = true,
            "m_SampleRate" if sample_rate.is_none() => {
                sample_rate = Some(parse_f32(value, "m_SampleRate", line_no)?)
            }
            "m_StartTime" if start.is_none() => {
                start = Some(parse_f32(value, "m_StartTime", line_no)?)
            }
            "m_StopTime" if stop.is_none() => stop = Some(parse_f32(value, "m_StopTime", line_no)?),
            "m_LoopTime" if loop_time.is_none() => {
                loop_time = Some(parse_f32(value, "m_LoopTime", line_no)? != 0.0)
            }
            _ => {}
        }
    }

    if !is_clip {
        return Err(EmoviewError::clip("not an AnimationClip asset"));
    }

    let duration = match stop {
        Some(stop) => (stop - start.unwrap_or(0.0)).max(0.0),
        None => 0.0,
    };
    Ok(ClipDesc::new(
        duration,
        loop_time.unwrap_or(false),
        sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
    ))
}

fn parse_f32(value: &str, key: &str, line_no: usize) -> EmoviewResult<f32> {
    value
        .parse::<f32>()
        .map_err(|_| EmoviewError::clip(format!("line {line_no}: invalid {key} value '{value}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/clips/anim.rs"]
mod tests;
