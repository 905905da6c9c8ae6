use super::*;
use crate::{foundation::core::Vec3, framing::face::auto_frame};

fn rig() -> Rig {
    serde_json::from_str(
        r#"{
          "name": "kitsune",
          "view_position": [0.0, 1.52, 0.08],
          "landmarks": {
            "head": { "position": [0.0, 1.5, 0.0] },
            "left_eye": { "position": [-0.032, 1.56, 0.07] },
            "right_eye": { "position": [0.032, 1.56, 0.07] }
          },
          "poses": { "smile": { "head": [0.0, 0.1, 0.0] } }
        }"#,
    )
    .unwrap()
}

fn entry(name: &str) -> ClipEntry {
    ClipEntry {
        name: name.to_string(),
        path: format!("{name}.anim").into(),
    }
}

fn target_desc() -> TargetDesc {
    TargetDesc {
        width: 32,
        height: 32,
        depth_bits: 16,
        msaa_samples: 1,
        background: Rgb8::gray(0.15),
        near_clip: 0.01,
        far_clip: 10.0,
        vertical_fov_deg: 30.0,
    }
}

#[test]
fn pose_becomes_visible_after_frame_advance() {
    let mut host = PreviewHost::new(rig());
    let inst = host.duplicate_avatar("__copy").unwrap();
    let clip = ClipDesc::new(1.0, false, 60.0);

    host.begin_sampling();
    host.apply_pose(&inst, &entry("smile"), &clip, 1.0).unwrap();
    let rest = host.rig().landmarks.head.unwrap().position;
    assert_eq!(host.landmarks(&inst).head.unwrap().position, rest);

    host.advance_frame();
    let posed = host.landmarks(&inst).head.unwrap().position;
    assert!(posed.abs_diff_eq(rest + Vec3::new(0.0, 0.1, 0.0), 1e-6));
    assert_eq!(host.frames_advanced(), 1);

    host.end_sampling();
    assert_eq!(host.landmarks(&inst).head.unwrap().position, rest);
}

#[test]
fn apply_pose_requires_sampling_mode() {
    let mut host = PreviewHost::new(rig());
    let inst = host.duplicate_avatar("").unwrap();
    let err = host
        .apply_pose(&inst, &entry("smile"), &ClipDesc::new(1.0, true, 30.0), 0.5)
        .unwrap_err();
    assert!(matches!(err, EmoviewError::Capture(_)));
}

#[test]
fn root_motion_toggles_only_with_animator() {
    let mut host = PreviewHost::new(rig());
    let inst = host.duplicate_avatar("").unwrap();
    assert_eq!(host.set_root_motion(&inst, false), Some(true));
    assert_eq!(host.set_root_motion(&inst, true), Some(false));

    let mut no_anim = rig();
    no_anim.has_animator = false;
    let mut host = PreviewHost::new(no_anim);
    let inst = host.duplicate_avatar("").unwrap();
    assert_eq!(host.set_root_motion(&inst, false), None);
}

#[test]
fn handles_are_tracked_until_released() {
    let mut host = PreviewHost::new(rig());
    let t = host.create_target(&target_desc()).unwrap();
    let i = host.duplicate_avatar("").unwrap();
    assert_eq!((host.live_targets(), host.live_instances()), (1, 1));

    host.destroy_instance(&i);
    host.release_target(&t);
    assert_eq!((host.live_targets(), host.live_instances()), (0, 0));

    let cam = auto_frame(&LandmarkSet::default(), &host.reference_view(), 30.0).camera;
    assert!(host.render(&t, &cam).is_err());
}

#[test]
fn hidden_source_is_not_drawn() {
    let mut host = PreviewHost::new(rig());
    let t = host.create_target(&target_desc()).unwrap();
    let cam = auto_frame(&host.rig().landmarks, &host.reference_view(), 30.0).camera;
    let bg = Rgb8::gray(0.15).to_pixel();

    let shown = host.render(&t, &cam).unwrap();
    assert!(shown.pixels().any(|p| *p != bg));

    assert!(host.set_source_visible(false));
    let hidden = host.render(&t, &cam).unwrap();
    assert!(hidden.pixels().all(|p| *p == bg));
}

#[test]
fn zero_sized_target_is_rejected() {
    let mut host = PreviewHost::new(rig());
    let desc = TargetDesc {
        width: 0,
        ..target_desc()
    };
    assert!(host.create_target(&desc).is_err());
}
