use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbImage;

use crate::foundation::error::EmoviewResult;

/// Ensure the parent directory for an output path exists.
pub fn ensure_parent_dir(path: &Path) -> EmoviewResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Path of the preview image for clip `name` inside `out_dir`.
pub fn preview_path(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{name}.png"))
}

/// Encode `image` as PNG at `<out_dir>/<name>.png`, creating `out_dir` if needed.
pub fn write_preview_png(out_dir: &Path, name: &str, image: &RgbImage) -> EmoviewResult<PathBuf> {
    let path = preview_path(out_dir, name);
    ensure_parent_dir(&path)?;
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/output.rs"]
mod tests;
