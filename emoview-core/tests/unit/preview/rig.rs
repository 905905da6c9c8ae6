use super::*;

const RIG: &str = r#"{
  "name": "kitsune",
  "view_position": [0.0, 1.52, 0.08],
  "landmarks": {
    "head": { "position": [0.0, 1.5, 0.0] },
    "left_eye": { "position": [-0.032, 1.56, 0.07] },
    "right_eye": { "position": [0.032, 1.56, 0.07] }
  },
  "poses": { "smile": { "head": [0.0, 0.02, 0.0] } }
}"#;

#[test]
fn parses_with_defaults() {
    let rig: Rig = serde_json::from_str(RIG).unwrap();
    rig.validate().unwrap();
    assert_eq!(rig.forward, Vec3::Z);
    assert!(rig.has_animator);
    assert_eq!(rig.landmarks.present(), 3);
    let head = rig.landmarks.head.unwrap();
    assert_eq!(head.forward, Vec3::Z);
    assert_eq!(head.up, Vec3::Y);
}

#[test]
fn pose_offsets_scale_with_progress() {
    let rig: Rig = serde_json::from_str(RIG).unwrap();
    let half = rig.posed_landmarks("smile", 0.5);
    let head = half.head.unwrap().position;
    assert!(head.abs_diff_eq(Vec3::new(0.0, 1.51, 0.0), 1e-6));
    assert_eq!(half.left_eye, rig.landmarks.left_eye);

    let clamped = rig.posed_landmarks("smile", 3.0).head.unwrap().position;
    assert!(clamped.abs_diff_eq(Vec3::new(0.0, 1.52, 0.0), 1e-6));
    assert_eq!(rig.posed_landmarks("unknown", 1.0), rig.landmarks);
}

#[test]
fn rejects_parallel_orientation() {
    let mut rig: Rig = serde_json::from_str(RIG).unwrap();
    rig.up = Vec3::Z;
    assert!(matches!(rig.validate(), Err(EmoviewError::Validation(_))));
}

#[test]
fn rejects_non_finite_landmarks() {
    let mut rig: Rig = serde_json::from_str(RIG).unwrap();
    rig.landmarks.head.as_mut().unwrap().position.x = f32::NAN;
    assert!(rig.validate().is_err());
}

#[test]
fn rejects_unknown_keys() {
    let err = serde_json::from_str::<Rig>(r#"{ "view_position": [0,0,0], "eyes": [] }"#);
    assert!(err.is_err());
}

#[test]
fn rejects_parallel_head_axes() {
    let mut rig: Rig = serde_json::from_str(RIG).unwrap();
    rig.landmarks.head.as_mut().unwrap().forward = Vec3::Y;
    let err = rig.validate().unwrap_err();
    assert!(matches!(err, EmoviewError::Validation(_)));
    assert!(err.to_string().contains("head"));

    // Eye axes never orient the camera.
    let mut rig: Rig = serde_json::from_str(RIG).unwrap();
    rig.landmarks.left_eye.as_mut().unwrap().forward = Vec3::Y;
    rig.validate().unwrap();
}

#[test]
fn rejects_non_finite_pose_offsets() {
    let mut rig: Rig = serde_json::from_str(RIG).unwrap();
    rig.poses.get_mut("smile").unwrap().left_eye = Some(Vec3::new(0.0, f32::INFINITY, 0.0));
    let err = rig.validate().unwrap_err();
    assert!(err.to_string().contains("smile"));
}
