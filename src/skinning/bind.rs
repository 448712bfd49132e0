use glam::Mat4;

use crate::error::{Result, RigError};
use crate::math;

/// Per-joint data cached once per rig: the rotation-only correction between
/// the animation skeleton's rest frames and the target rig's bind frames, and
/// the inverse bind transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct BindAlignment {
    alignment_fix: Vec<Mat4>,
    bind_inverse: Vec<Mat4>,
}

impl BindAlignment {
    /// `reference` and `target_binds` are both indexed by selected joint.
    pub fn compute(reference: &[Mat4], target_binds: &[Mat4]) -> Result<Self> {
        if reference.len() != target_binds.len() {
            return Err(RigError::InvalidWeights(format!(
                "{} reference transforms for {} bind transforms",
                reference.len(),
                target_binds.len()
            )));
        }

        let mut alignment_fix = Vec::with_capacity(reference.len());
        let mut bind_inverse = Vec::with_capacity(reference.len());

        for (k, (rest, bind)) in reference.iter().zip(target_binds).enumerate() {
            if !math::is_invertible(bind) {
                return Err(RigError::InvalidWeights(format!(
                    "bind transform of selected joint {k} is singular"
                )));
            }
            if !math::is_invertible(rest) {
                return Err(RigError::InvalidWeights(format!(
                    "reference transform of selected joint {k} is singular"
                )));
            }

            // Translation is already carried by the bind transform.
            alignment_fix.push(math::without_translation(rest.inverse() * *bind));
            bind_inverse.push(bind.inverse());
        }

        Ok(Self {
            alignment_fix,
            bind_inverse,
        })
    }

    /// No correction: reference frames already match the bind frames.
    pub fn identity(target_binds: &[Mat4]) -> Result<Self> {
        let mut alignment = Self::compute(target_binds, target_binds)?;
        alignment.alignment_fix.fill(Mat4::IDENTITY);
        Ok(alignment)
    }

    pub fn alignment_fix(&self) -> &[Mat4] {
        &self.alignment_fix
    }

    pub fn bind_inverse(&self) -> &[Mat4] {
        &self.bind_inverse
    }

    pub fn len(&self) -> usize {
        self.bind_inverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bind_inverse.is_empty()
    }

    /// `posed * alignment_fix * bind_inverse` for every selected joint.
    pub fn skin_matrices(&self, posed: &[Mat4]) -> Result<Vec<Mat4>> {
        if posed.len() != self.len() {
            return Err(RigError::ShapeMismatch {
                expected: self.len(),
                found: posed.len(),
            });
        }

        Ok(posed
            .iter()
            .zip(&self.alignment_fix)
            .zip(&self.bind_inverse)
            .map(|((p, fix), inv)| *p * *fix * *inv)
            .collect())
    }
}
