use image::{
    RgbImage,
    imageops::{self, FilterType},
};

use crate::{
    capture::host::TargetDesc,
    foundation::core::{Rgb8, Vec3},
    framing::face::CameraPose,
};

/// A world-space sphere drawn as a flat disc.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Disc {
    pub(crate) center: Vec3,
    pub(crate) radius: f32,
    pub(crate) color: Rgb8,
}

/// Per-axis supersampling used to emulate the target's multisample count.
fn supersample(msaa_samples: u32) -> u32 {
    match msaa_samples {
        0 | 1 => 1,
        2..=4 => 2,
        _ => 3,
    }
}

/// Draw `discs` through a perspective `camera` into a fresh image of the target size.
///
/// Discs are painted far to near; anything outside the clip planes is dropped.
pub(crate) fn rasterize(desc: &TargetDesc, camera: &CameraPose, discs: &[Disc]) -> RgbImage {
    let ss = supersample(desc.msaa_samples);
    let (w, h) = (desc.width * ss, desc.height * ss);
    let mut img = RgbImage::from_pixel(w, h, desc.background.to_pixel());

    let tan_half = (desc.vertical_fov_deg.to_radians() * 0.5).tan();
    let aspect = w as f32 / h as f32;
    let (wf, hf) = (w as f32, h as f32);

    let mut projected: Vec<(f32, f32, f32, f32, Rgb8)> = discs
        .iter()
        .filter_map(|d| {
            let local = camera.to_local(d.center);
            if local.z <= desc.near_clip || local.z > desc.far_clip {
                return None;
            }
            let scale = 1.0 / (local.z * tan_half);
            let px = (local.x * scale / aspect * 0.5 + 0.5) * wf;
            let py = (0.5 - local.y * scale * 0.5) * hf;
            let pr = d.radius * scale * 0.5 * hf;
            Some((local.z, px, py, pr, d.color))
        })
        .collect();
    projected.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, px, py, pr, color) in projected {
        fill_disc(&mut img, px, py, pr, color);
    }

    if ss > 1 {
        imageops::resize(&img, desc.width, desc.height, FilterType::Triangle)
    } else {
        img
    }
}

fn fill_disc(img: &mut RgbImage, cx: f32, cy: f32, r: f32, color: Rgb8) {
    if !(r > 0.0 && cx.is_finite() && cy.is_finite()) {
        return;
    }
    let (w, h) = (img.width() as f32, img.height() as f32);
    let x0 = (cx - r).floor().clamp(0.0, w) as u32;
    let x1 = (cx + r).ceil().clamp(0.0, w) as u32;
    let y0 = (cy - r).floor().clamp(0.0, h) as u32;
    let y1 = (cy + r).ceil().clamp(0.0, h) as u32;
    let r2 = r * r;
    let px = color.to_pixel();
    for y in y0..y1 {
        let dy = y as f32 + 0.5 - cy;
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x, y, px);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/raster.rs"]
mod tests;
