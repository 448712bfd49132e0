use glam::{Mat4, Vec3, Vec4};
use rayon::prelude::*;

use super::bind::BindAlignment;
use super::weights::SkinningWeights;
use crate::error::{Result, RigError};
use crate::kinematics::{ForwardKinematics, GlobalTransforms, PoseBatch};
use crate::rig::{JointHierarchy, JointSelection};

/// Blends `skin_matrices` per vertex and applies the result to the
/// homogeneous bind vertices.
///
/// The blend is a plain weighted sum of 4x4 matrix entries, not a rotation
/// interpolation, so the usual LBS volume loss near strongly bent joints is
/// part of the output. Only non-zero weights are visited.
pub fn linear_blend(
    skin_matrices: &[Mat4],
    weights: &SkinningWeights,
    bind_vertices: &[Vec4],
) -> Result<Vec<Vec3>> {
    if skin_matrices.len() != weights.joint_count() {
        return Err(RigError::InvalidWeights(format!(
            "{} skin matrices for {} weight columns",
            skin_matrices.len(),
            weights.joint_count()
        )));
    }
    if bind_vertices.len() != weights.vertex_count() {
        return Err(RigError::InvalidWeights(format!(
            "{} bind vertices for {} weight rows",
            bind_vertices.len(),
            weights.vertex_count()
        )));
    }

    Ok(bind_vertices
        .par_iter()
        .enumerate()
        .map(|(v, bind)| {
            let blended = weights
                .nonzero(v)
                .fold(Mat4::ZERO, |acc, (j, w)| acc + skin_matrices[j] * w);
            (blended * *bind).truncate()
        })
        .collect())
}

/// One rig's deformation context: topology, weights, bind geometry and the
/// cached bind alignment.
#[derive(Debug, Clone)]
pub struct SkinnedRig {
    hierarchy: JointHierarchy,
    selection: JointSelection,
    weights: SkinningWeights,
    bind_vertices: Vec<Vec4>,
    alignment: BindAlignment,
}

impl SkinnedRig {
    /// Aligns against the hierarchy's identity pose.
    pub fn new(
        hierarchy: JointHierarchy,
        weights: SkinningWeights,
        bind_vertices: Vec<Vec3>,
        target_binds: Vec<Mat4>,
    ) -> Result<Self> {
        let reference = ForwardKinematics::rest_pose(&hierarchy)?;
        Self::with_reference(hierarchy, weights, bind_vertices, target_binds, &reference)
    }

    /// `reference` is a full-hierarchy frame of world transforms.
    pub fn with_reference(
        hierarchy: JointHierarchy,
        weights: SkinningWeights,
        bind_vertices: Vec<Vec3>,
        target_binds: Vec<Mat4>,
        reference: &[Mat4],
    ) -> Result<Self> {
        let selection = hierarchy.select(weights.labels())?;

        if target_binds.len() != selection.len() {
            return Err(RigError::InvalidWeights(format!(
                "{} bind transforms for {} weight columns",
                target_binds.len(),
                selection.len()
            )));
        }
        if bind_vertices.len() != weights.vertex_count() {
            return Err(RigError::InvalidWeights(format!(
                "{} bind vertices for {} weight rows",
                bind_vertices.len(),
                weights.vertex_count()
            )));
        }
        if reference.len() != hierarchy.joint_count() {
            return Err(RigError::ShapeMismatch {
                expected: hierarchy.joint_count(),
                found: reference.len(),
            });
        }

        let alignment = BindAlignment::compute(&selection.gather(reference)?, &target_binds)?;

        log::info!(
            "rig ready: {} joints, {} skinned, {} vertices",
            hierarchy.joint_count(),
            selection.len(),
            bind_vertices.len()
        );

        Ok(Self {
            hierarchy,
            selection,
            weights,
            bind_vertices: bind_vertices.into_iter().map(|v| v.extend(1.0)).collect(),
            alignment,
        })
    }

    pub fn hierarchy(&self) -> &JointHierarchy {
        &self.hierarchy
    }

    pub fn selection(&self) -> &JointSelection {
        &self.selection
    }

    pub fn weights(&self) -> &SkinningWeights {
        &self.weights
    }

    pub fn alignment(&self) -> &BindAlignment {
        &self.alignment
    }

    pub fn bind_vertices(&self) -> &[Vec4] {
        &self.bind_vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.bind_vertices.len()
    }

    /// Skin matrices from posed transforms of the selected joints, in
    /// weight-column order.
    pub fn skin_matrices(&self, posed_selected: &[Mat4]) -> Result<Vec<Mat4>> {
        self.alignment.skin_matrices(posed_selected)
    }

    pub fn deform_selected(&self, posed_selected: &[Mat4]) -> Result<Vec<Vec3>> {
        let skin = self.skin_matrices(posed_selected)?;
        linear_blend(&skin, &self.weights, &self.bind_vertices)
    }

    /// Deforms with one full-hierarchy frame of world transforms.
    pub fn deform(&self, frame: &[Mat4]) -> Result<Vec<Vec3>> {
        if frame.len() != self.hierarchy.joint_count() {
            return Err(RigError::ShapeMismatch {
                expected: self.hierarchy.joint_count(),
                found: frame.len(),
            });
        }
        self.deform_selected(&self.selection.gather(frame)?)
    }

    pub fn deform_batch(&self, transforms: &GlobalTransforms) -> Result<Vec<Vec<Vec3>>> {
        let posed = transforms
            .iter()
            .map(|frame| self.deform(frame))
            .collect::<Result<Vec<_>>>()?;
        log::debug!(
            "skinned {} frames x {} vertices",
            posed.len(),
            self.vertex_count()
        );
        Ok(posed)
    }

    /// Runs forward kinematics on `pose` and deforms every frame.
    pub fn animate(&self, pose: &PoseBatch) -> Result<Vec<Vec<Vec3>>> {
        let transforms = ForwardKinematics::evaluate(pose, &self.hierarchy)?;
        self.deform_batch(&transforms)
    }
}
