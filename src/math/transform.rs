use glam::{Mat3, Mat4, Quat, Vec3, Vec4};

/// Builds a homogeneous transform with `rotation` as its upper 3x3 block and
/// `translation` as its last column.
pub fn rigid(rotation: Mat3, translation: Vec3) -> Mat4 {
    Mat4::from_cols(
        rotation.x_axis.extend(0.0),
        rotation.y_axis.extend(0.0),
        rotation.z_axis.extend(0.0),
        translation.extend(1.0),
    )
}

/// Same transform with the translation column reset to zero.
pub fn without_translation(transform: Mat4) -> Mat4 {
    Mat4 {
        w_axis: Vec4::W,
        ..transform
    }
}

pub fn translation(transform: &Mat4) -> Vec3 {
    transform.w_axis.truncate()
}

pub fn rotation_block(transform: &Mat4) -> Mat3 {
    Mat3::from_mat4(*transform)
}

pub fn is_invertible(transform: &Mat4) -> bool {
    let det = transform.determinant();
    det.is_finite() && det.abs() > f32::MIN_POSITIVE
}

/// Unit axis and angle of a rotation matrix, angle in `[0, pi]`.
///
/// A rotation close to identity yields `(Vec3::X, 0.0)`.
pub fn axis_angle(rotation: Mat3) -> (Vec3, f32) {
    let mut q = Quat::from_mat3(&rotation);
    if q.w < 0.0 {
        q = -q;
    }
    q.to_axis_angle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rigid_places_rotation_and_translation() {
        let r = Mat3::from_rotation_z(FRAC_PI_2);
        let m = rigid(r, Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(translation(&m), Vec3::new(1.0, 2.0, 3.0));
        assert!(rotation_block(&m).abs_diff_eq(r, 1e-6));
        assert_eq!(m.row(3), Vec4::W);
    }

    #[test]
    fn without_translation_keeps_rotation() {
        let m = rigid(Mat3::from_rotation_x(0.3), Vec3::splat(5.0));
        let stripped = without_translation(m);

        assert_eq!(translation(&stripped), Vec3::ZERO);
        assert_eq!(rotation_block(&stripped), rotation_block(&m));
    }

    #[test]
    fn axis_angle_is_canonical() {
        let (axis, angle) = axis_angle(Mat3::from_rotation_y(-FRAC_PI_2));
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = 1e-5);
        assert!(axis.abs_diff_eq(Vec3::NEG_Y, 1e-5));

        let (axis, angle) = axis_angle(Mat3::IDENTITY);
        assert_eq!(angle, 0.0);
        assert_eq!(axis, Vec3::X);
    }

    #[test]
    fn singular_transform_is_not_invertible() {
        assert!(is_invertible(&Mat4::IDENTITY));
        assert!(!is_invertible(&Mat4::ZERO));
    }
}
