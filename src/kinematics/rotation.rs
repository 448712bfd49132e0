use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// How a pose batch stores one joint rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationEncoding {
    /// Two 3-vectors orthonormalized by Gram-Schmidt into the first two
    /// matrix columns.
    #[default]
    SixD,
    /// Radians about X, Y and Z, applied as `Rx * Ry * Rz`.
    Euler,
}

impl RotationEncoding {
    pub const fn components(self) -> usize {
        match self {
            RotationEncoding::SixD => 6,
            RotationEncoding::Euler => 3,
        }
    }

    /// Encoded identity rotation.
    pub fn identity(self) -> &'static [f32] {
        match self {
            RotationEncoding::SixD => &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            RotationEncoding::Euler => &[0.0, 0.0, 0.0],
        }
    }

    pub fn decode(self, values: &[f32]) -> Result<Mat3, RotationError> {
        match self {
            RotationEncoding::SixD => {
                let v: &[f32; 6] = values
                    .try_into()
                    .map_err(|_| RotationError::WrongLength)?;
                decode_six_d(v)
            }
            RotationEncoding::Euler => {
                let v: &[f32; 3] = values
                    .try_into()
                    .map_err(|_| RotationError::WrongLength)?;
                decode_euler(Vec3::from_array(*v))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationError {
    NonFinite,
    ZeroLength,
    Parallel,
    WrongLength,
}

impl RotationError {
    pub fn reason(self) -> &'static str {
        match self {
            RotationError::NonFinite => "non-finite component",
            RotationError::ZeroLength => "first 6D vector has zero length",
            RotationError::Parallel => "6D vectors are parallel",
            RotationError::WrongLength => "wrong number of components",
        }
    }
}

/// Gram-Schmidt decode of the continuous 6D representation. Degenerate
/// input is reported, never patched.
///
/// Only directions matter: each vector is rescaled by its largest component
/// first, so tiny or huge but well-posed input decodes like unit input. The
/// second vector counts as parallel when what is left of it after removing
/// the first direction is at rounding level.
pub fn decode_six_d(values: &[f32; 6]) -> Result<Mat3, RotationError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(RotationError::NonFinite);
    }

    let a1 = rescaled(Vec3::new(values[0], values[1], values[2]))
        .ok_or(RotationError::ZeroLength)?;
    let a2 = rescaled(Vec3::new(values[3], values[4], values[5]))
        .ok_or(RotationError::Parallel)?;

    let b1 = a1.normalize();

    let u2 = a2 - b1.dot(a2) * b1;
    let len2 = u2.length();
    if len2 <= f32::EPSILON * a2.length() {
        return Err(RotationError::Parallel);
    }
    let b2 = u2 / len2;
    let b3 = b1.cross(b2);

    Ok(Mat3::from_cols(b1, b2, b3))
}

/// `v` divided by its largest absolute component, `None` for the zero vector.
fn rescaled(v: Vec3) -> Option<Vec3> {
    let scale = v.abs().max_element();
    (scale > 0.0).then(|| v / scale)
}

pub fn decode_euler(angles: Vec3) -> Result<Mat3, RotationError> {
    if !angles.is_finite() {
        return Err(RotationError::NonFinite);
    }
    Ok(Mat3::from_rotation_x(angles.x)
        * Mat3::from_rotation_y(angles.y)
        * Mat3::from_rotation_z(angles.z))
}
