use glam::{DMat4, DVec3};

/// Build a homogeneous transform from per-axis rotations (radians) and a translation.
/// Rotations compose as Z∘Y∘X; the translation is applied last.
pub fn rotation_matrix(rotation: DVec3, translation: DVec3) -> DMat4 {
    let rx = DMat4::from_rotation_x(rotation.x);
    let ry = DMat4::from_rotation_y(rotation.y);
    let rz = DMat4::from_rotation_z(rotation.z);

    DMat4::from_translation(translation) * rz * ry * rx
}

/// Translation-only transform used to place a template at `offset`.
pub fn placement_matrix(offset: DVec3) -> DMat4 {
    rotation_matrix(DVec3::ZERO, offset)
}
