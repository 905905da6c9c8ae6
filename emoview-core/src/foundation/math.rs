use glam::{Mat3, Quat, Vec3};

/// Rotation whose local +Z points along `forward` and whose local +Y is as close
/// to `up` as the constraint allows (left-handed basis, right = up x forward).
///
/// A zero `forward` yields the identity. Parallel `forward`/`up` is not defined.
pub(crate) fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let z = forward.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let x = up.cross(z).normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
