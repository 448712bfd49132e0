use glam::Mat4;

use super::hierarchy::JointHierarchy;
use crate::error::{Result, RigError};

/// Ordered subset of hierarchy joints. Position `k` in the selection
/// corresponds to column `k` of a skinning weight matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointSelection {
    indices: Vec<usize>,
}

impl JointSelection {
    pub fn from_labels<S: AsRef<str>>(hierarchy: &JointHierarchy, labels: &[S]) -> Result<Self> {
        let indices = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                hierarchy
                    .index_of(label)
                    .ok_or_else(|| RigError::UnknownJoint(label.to_owned()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { indices })
    }

    pub fn from_indices(hierarchy: &JointHierarchy, indices: Vec<usize>) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= hierarchy.joint_count()) {
            return Err(RigError::UnknownJoint(format!("#{bad}")));
        }
        Ok(Self { indices })
    }

    /// Selects every joint in hierarchy order.
    pub fn all(hierarchy: &JointHierarchy) -> Self {
        Self {
            indices: (0..hierarchy.joint_count()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Picks the selected joints' transforms out of a full-hierarchy frame.
    pub fn gather(&self, frame: &[Mat4]) -> Result<Vec<Mat4>> {
        self.indices
            .iter()
            .map(|&i| {
                frame.get(i).copied().ok_or(RigError::ShapeMismatch {
                    expected: i + 1,
                    found: frame.len(),
                })
            })
            .collect()
    }
}
