use glam::{Mat3, Vec3};

use super::rotation::RotationEncoding;
use crate::error::{Result, RigError};
use crate::rig::JointHierarchy;

/// `frames x joints` local rotations in a single declared encoding, plus one
/// root translation per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseBatch {
    encoding: RotationEncoding,
    frames: usize,
    joints: usize,
    values: Vec<f32>,
    root_translations: Vec<Vec3>,
}

impl PoseBatch {
    /// `values` is frame-major then joint-major, `encoding.components()`
    /// floats per joint.
    pub fn new(
        encoding: RotationEncoding,
        frames: usize,
        joints: usize,
        values: Vec<f32>,
    ) -> Result<Self> {
        let expected = frames * joints * encoding.components();
        if values.len() != expected {
            return Err(RigError::ShapeMismatch {
                expected,
                found: values.len(),
            });
        }

        Ok(Self {
            encoding,
            frames,
            joints,
            values,
            root_translations: vec![Vec3::ZERO; frames],
        })
    }

    /// Every joint at the identity rotation.
    pub fn rest(encoding: RotationEncoding, frames: usize, joints: usize) -> Self {
        let values = encoding
            .identity()
            .iter()
            .copied()
            .cycle()
            .take(frames * joints * encoding.components())
            .collect();

        Self {
            encoding,
            frames,
            joints,
            values,
            root_translations: vec![Vec3::ZERO; frames],
        }
    }

    pub fn from_six_d(frames: Vec<Vec<[f32; 6]>>) -> Result<Self> {
        let joints = frames.first().map_or(0, Vec::len);
        let frame_count = frames.len();
        let mut values = Vec::with_capacity(frame_count * joints * 6);

        for frame in &frames {
            if frame.len() != joints {
                return Err(RigError::ShapeMismatch {
                    expected: joints,
                    found: frame.len(),
                });
            }
            values.extend(frame.iter().flatten());
        }

        Self::new(RotationEncoding::SixD, frame_count, joints, values)
    }

    pub fn from_euler(frames: Vec<Vec<Vec3>>) -> Result<Self> {
        let joints = frames.first().map_or(0, Vec::len);
        let frame_count = frames.len();
        let mut values = Vec::with_capacity(frame_count * joints * 3);

        for frame in &frames {
            if frame.len() != joints {
                return Err(RigError::ShapeMismatch {
                    expected: joints,
                    found: frame.len(),
                });
            }
            values.extend(frame.iter().flat_map(|v| v.to_array()));
        }

        Self::new(RotationEncoding::Euler, frame_count, joints, values)
    }

    pub fn with_root_translations(mut self, translations: Vec<Vec3>) -> Result<Self> {
        if translations.len() != self.frames {
            return Err(RigError::ShapeMismatch {
                expected: self.frames,
                found: translations.len(),
            });
        }
        self.root_translations = translations;
        Ok(self)
    }

    /// Reorders motion data whose joints follow `source_names` into hierarchy
    /// order. Hierarchy joints missing from the source stay at identity.
    pub fn remap<S: AsRef<str>>(
        &self,
        source_names: &[S],
        hierarchy: &JointHierarchy,
    ) -> Result<Self> {
        if source_names.len() != self.joints {
            return Err(RigError::ShapeMismatch {
                expected: self.joints,
                found: source_names.len(),
            });
        }

        let stride = self.encoding.components();
        let mut out = Self::rest(self.encoding, self.frames, hierarchy.joint_count());
        out.root_translations = self.root_translations.clone();

        let mapping: Vec<(usize, usize)> = source_names
            .iter()
            .enumerate()
            .filter_map(|(src, name)| match hierarchy.index_of(name.as_ref()) {
                Some(dst) => Some((src, dst)),
                None => {
                    log::warn!("motion joint `{}` not in hierarchy, skipped", name.as_ref());
                    None
                }
            })
            .collect();

        for frame in 0..self.frames {
            for &(src, dst) in &mapping {
                let from = (frame * self.joints + src) * stride;
                let to = (frame * out.joints + dst) * stride;
                out.values[to..to + stride].copy_from_slice(&self.values[from..from + stride]);
            }
        }

        Ok(out)
    }

    pub fn encoding(&self) -> RotationEncoding {
        self.encoding
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn joint_count(&self) -> usize {
        self.joints
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn root_translation(&self, frame: usize) -> Vec3 {
        self.root_translations.get(frame).copied().unwrap_or(Vec3::ZERO)
    }

    /// Raw encoded rotation of one joint.
    pub fn encoded(&self, frame: usize, joint: usize) -> &[f32] {
        let stride = self.encoding.components();
        let start = (frame * self.joints + joint) * stride;
        &self.values[start..start + stride]
    }

    pub fn rotation(&self, frame: usize, joint: usize) -> Result<Mat3> {
        self.encoding
            .decode(self.encoded(frame, joint))
            .map_err(|e| RigError::InvalidRotationInput {
                frame,
                joint,
                reason: e.reason(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_value_count() {
        let err = PoseBatch::new(RotationEncoding::Euler, 2, 3, vec![0.0; 17]).unwrap_err();
        assert!(matches!(
            err,
            RigError::ShapeMismatch {
                expected: 18,
                found: 17
            }
        ));
    }

    #[test]
    fn rest_pose_decodes_to_identity() {
        let pose = PoseBatch::rest(RotationEncoding::SixD, 2, 4);
        assert_eq!(pose.values().len(), 48);
        for f in 0..2 {
            for j in 0..4 {
                assert!(pose.rotation(f, j).unwrap().abs_diff_eq(Mat3::IDENTITY, 1e-6));
            }
        }
    }

    #[test]
    fn ragged_frames_are_rejected() {
        let err = PoseBatch::from_euler(vec![vec![Vec3::ZERO; 2], vec![Vec3::ZERO; 3]]).unwrap_err();
        assert!(matches!(err, RigError::ShapeMismatch { .. }));
    }

    #[test]
    fn degenerate_rotation_reports_frame_and_joint() {
        let pose = PoseBatch::from_six_d(vec![vec![[1.0, 0.0, 0.0, 0.0, 1.0, 0.0], [0.0; 6]]])
            .unwrap();
        let err = pose.rotation(0, 1).unwrap_err();
        assert!(matches!(
            err,
            RigError::InvalidRotationInput { frame: 0, joint: 1, .. }
        ));
    }

    #[test]
    fn remap_follows_hierarchy_order() {
        let h = JointHierarchy::builder()
            .root("Hips", Vec3::ZERO)
            .joint("Spine", "Hips", Vec3::Y)
            .joint("Head", "Spine", Vec3::Y)
            .build()
            .unwrap();

        let source = PoseBatch::from_euler(vec![vec![
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.2, 0.0, 0.0),
            Vec3::new(0.3, 0.0, 0.0),
        ]])
        .unwrap();

        let remapped = source.remap(&["Head", "Hips", "Tail"], &h).unwrap();
        assert_eq!(remapped.joint_count(), 3);
        assert_eq!(remapped.encoded(0, 0), &[0.2, 0.0, 0.0]);
        assert_eq!(remapped.encoded(0, 1), &[0.0, 0.0, 0.0]);
        assert_eq!(remapped.encoded(0, 2), &[0.1, 0.0, 0.0]);
    }
}
