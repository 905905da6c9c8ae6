use super::*;

fn vec_close(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, 1e-5)
}

#[test]
fn look_rotation_identity_for_world_axes() {
    let q = look_rotation(Vec3::Z, Vec3::Y);
    assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
}

#[test]
fn look_rotation_maps_local_axes() {
    let q = look_rotation(Vec3::NEG_Z, Vec3::Y);
    assert!(vec_close(q * Vec3::Z, Vec3::NEG_Z));
    assert!(vec_close(q * Vec3::Y, Vec3::Y));
    assert!(vec_close(q * Vec3::X, Vec3::NEG_X));
}

#[test]
fn look_rotation_orthogonalizes_up() {
    let fwd = Vec3::new(1.0, 0.0, 1.0).normalize();
    let q = look_rotation(fwd, Vec3::new(0.0, 1.0, 0.3));
    assert!(vec_close(q * Vec3::Z, fwd));
    assert!((q * Vec3::Y).dot(fwd).abs() < 1e-5);
}

#[test]
fn zero_forward_is_identity() {
    assert_eq!(look_rotation(Vec3::ZERO, Vec3::Y), Quat::IDENTITY);
}
