use glam::{Mat4, Vec3};
use rayon::prelude::*;

use super::pose::PoseBatch;
use super::rotation::RotationEncoding;
use crate::error::{Result, RigError};
use crate::math;
use crate::rig::{JointHierarchy, JointSelection};

/// World transforms for every joint of every frame, frame-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalTransforms {
    frames: usize,
    joints: usize,
    matrices: Vec<Mat4>,
}

impl GlobalTransforms {
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn joint_count(&self) -> usize {
        self.joints
    }

    /// # Panics
    ///
    /// If `frame >= self.frame_count()`. See [`GlobalTransforms::get_frame`].
    pub fn frame(&self, frame: usize) -> &[Mat4] {
        let start = frame * self.joints;
        &self.matrices[start..start + self.joints]
    }

    pub fn get_frame(&self, frame: usize) -> Option<&[Mat4]> {
        (frame < self.frames).then(|| self.frame(frame))
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Mat4]> + '_ {
        // chunks_exact panics on a zero chunk size
        self.matrices.chunks_exact(self.joints.max(1))
    }

    /// # Panics
    ///
    /// If `frame >= self.frame_count()`.
    pub fn joint_positions(&self, frame: usize) -> Vec<Vec3> {
        self.frame(frame).iter().map(math::translation).collect()
    }

    pub fn select(&self, frame: usize, selection: &JointSelection) -> Result<Vec<Mat4>> {
        let matrices = self.get_frame(frame).ok_or(RigError::FrameOutOfRange {
            frame,
            frame_count: self.frames,
        })?;
        selection.gather(matrices)
    }

    pub fn into_matrices(self) -> Vec<Mat4> {
        self.matrices
    }
}

pub struct ForwardKinematics;

impl ForwardKinematics {
    pub fn evaluate(pose: &PoseBatch, hierarchy: &JointHierarchy) -> Result<GlobalTransforms> {
        let joints = hierarchy.joint_count();
        if pose.joint_count() != joints {
            return Err(RigError::ShapeMismatch {
                expected: joints,
                found: pose.joint_count(),
            });
        }

        let frames = pose.frame_count();
        let mut matrices = vec![Mat4::IDENTITY; frames * joints];

        if joints > 0 {
            // collected in frame order so the reported failure is the earliest frame
            let results: Vec<Result<()>> = matrices
                .par_chunks_mut(joints)
                .enumerate()
                .map(|(frame, out)| Self::evaluate_frame(pose, hierarchy, frame, out))
                .collect();
            results.into_iter().collect::<Result<()>>()?;
        }

        log::debug!("evaluated FK for {frames} frames x {joints} joints");

        Ok(GlobalTransforms {
            frames,
            joints,
            matrices,
        })
    }

    /// Single-frame identity pose, the reference used for bind alignment.
    pub fn rest_pose(hierarchy: &JointHierarchy) -> Result<Vec<Mat4>> {
        let pose = PoseBatch::rest(RotationEncoding::SixD, 1, hierarchy.joint_count());
        Ok(Self::evaluate(&pose, hierarchy)?.into_matrices())
    }

    /// Fills `out` with the world transforms of one frame. Joints are visited
    /// in index order, which visits every parent before its children.
    pub fn evaluate_frame(
        pose: &PoseBatch,
        hierarchy: &JointHierarchy,
        frame: usize,
        out: &mut [Mat4],
    ) -> Result<()> {
        let root_translation = pose.root_translation(frame);

        for (j, joint) in hierarchy.joints().iter().enumerate() {
            let rotation = pose.rotation(frame, j)?;

            out[j] = match joint.parent {
                Some(parent) => out[parent] * math::rigid(rotation, joint.offset),
                None => math::rigid(rotation, root_translation),
            };
        }

        Ok(())
    }
}
