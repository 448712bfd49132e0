use std::collections::HashMap;

use glam::Vec3;

use super::joint::Joint;
use super::selection::JointSelection;
use crate::error::{Result, RigError};

/// Immutable joint tree stored in topological order (`parent[j] < j`).
#[derive(Debug, Clone)]
pub struct JointHierarchy {
    joints: Vec<Joint>,
    index: HashMap<String, usize>,
}

impl JointHierarchy {
    pub fn builder() -> HierarchyBuilder {
        HierarchyBuilder::new()
    }

    pub fn new(joints: Vec<Joint>) -> Result<Self> {
        let mut index = HashMap::with_capacity(joints.len());

        for (j, joint) in joints.iter().enumerate() {
            if let Some(parent) = joint.parent {
                if parent >= joints.len() {
                    return Err(RigError::InvalidTopology(format!(
                        "joint `{}` ({j}) has parent {parent}, but only {} joints exist",
                        joint.name,
                        joints.len()
                    )));
                }
                if parent >= j {
                    return Err(RigError::InvalidTopology(format!(
                        "joint `{}` ({j}) has parent {parent}; parents must precede their children",
                        joint.name
                    )));
                }
            }

            if index.insert(joint.name.clone(), j).is_some() {
                return Err(RigError::InvalidTopology(format!(
                    "duplicate joint name `{}`",
                    joint.name
                )));
            }
        }

        Ok(Self { joints, index })
    }

    /// Builds a hierarchy from parallel arrays, `-1` marking roots.
    pub fn from_parent_indices<S: AsRef<str>>(
        names: &[S],
        parents: &[i32],
        offsets: &[Vec3],
    ) -> Result<Self> {
        if names.len() != parents.len() || names.len() != offsets.len() {
            return Err(RigError::InvalidTopology(format!(
                "got {} names, {} parents and {} offsets",
                names.len(),
                parents.len(),
                offsets.len()
            )));
        }

        let joints = names
            .iter()
            .zip(parents)
            .zip(offsets)
            .enumerate()
            .map(|(j, ((name, &parent), &offset))| {
                let parent = match parent {
                    -1 => None,
                    p if p >= 0 => Some(p as usize),
                    p => {
                        return Err(RigError::InvalidTopology(format!(
                            "joint `{}` ({j}) has parent {p}",
                            name.as_ref()
                        )))
                    }
                };
                Ok(Joint {
                    name: name.as_ref().to_owned(),
                    parent,
                    offset,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(joints)
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.joints.get(index).and_then(|j| j.parent)
    }

    pub fn offset(&self, index: usize) -> Option<Vec3> {
        self.joints.get(index).map(|j| j.offset)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.joints.get(index).map(|j| j.name.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn parent_indices(&self) -> Vec<i32> {
        self.joints.iter().map(Joint::parent_index).collect()
    }

    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.joints
            .iter()
            .enumerate()
            .filter(|(_, j)| j.is_root())
            .map(|(i, _)| i)
    }

    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.joints
            .iter()
            .enumerate()
            .filter(move |(_, j)| j.parent == Some(index))
            .map(|(i, _)| i)
    }

    /// Maps an ordered label list (e.g. weight-matrix columns) to hierarchy
    /// indices.
    pub fn select<S: AsRef<str>>(&self, labels: &[S]) -> Result<JointSelection> {
        JointSelection::from_labels(self, labels)
    }
}

/// Incremental hierarchy construction; parents are referenced by name and
/// must be added before their children.
pub struct HierarchyBuilder {
    joints: Vec<(String, Option<String>, Vec3)>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self { joints: Vec::new() }
    }

    pub fn root(mut self, name: impl Into<String>, offset: Vec3) -> Self {
        self.joints.push((name.into(), None, offset));
        self
    }

    pub fn joint(
        mut self,
        name: impl Into<String>,
        parent: impl Into<String>,
        offset: Vec3,
    ) -> Self {
        self.joints.push((name.into(), Some(parent.into()), offset));
        self
    }

    pub fn build(self) -> Result<JointHierarchy> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(self.joints.len());
        let mut joints = Vec::with_capacity(self.joints.len());

        for (j, (name, parent, offset)) in self.joints.iter().enumerate() {
            let parent = match parent {
                Some(parent_name) => Some(seen.get(parent_name.as_str()).copied().ok_or_else(
                    || {
                        RigError::InvalidTopology(format!(
                            "joint `{name}` references parent `{parent_name}` before it is defined"
                        ))
                    },
                )?),
                None => None,
            };
            seen.insert(name.as_str(), j);
            joints.push(Joint {
                name: name.clone(),
                parent,
                offset: *offset,
            });
        }

        JointHierarchy::new(joints)
    }
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> JointHierarchy {
        JointHierarchy::builder()
            .root("Hips", Vec3::Y)
            .joint("Spine", "Hips", Vec3::Y)
            .joint("LeftArm", "Spine", Vec3::X)
            .joint("RightArm", "Spine", Vec3::NEG_X)
            .build()
            .unwrap()
    }

    #[test]
    fn builder_resolves_parents_by_name() {
        let h = chain();
        assert_eq!(h.joint_count(), 4);
        assert_eq!(h.parent(0), None);
        assert_eq!(h.parent(2), Some(1));
        assert_eq!(h.index_of("RightArm"), Some(3));
        assert_eq!(h.parent_indices(), vec![-1, 0, 1, 1]);
        assert_eq!(h.children(1).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(h.roots().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn builder_rejects_undefined_parent() {
        let err = JointHierarchy::builder()
            .joint("Spine", "Hips", Vec3::Y)
            .root("Hips", Vec3::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, RigError::InvalidTopology(_)));
    }

    #[test]
    fn multiple_roots_are_allowed() {
        let h = JointHierarchy::from_parent_indices(
            &["a", "b", "c"],
            &[-1, -1, 1],
            &[Vec3::ZERO; 3],
        )
        .unwrap();
        assert_eq!(h.roots().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn rejects_out_of_range_and_cyclic_parents() {
        let offsets = [Vec3::ZERO; 3];
        for parents in [[-1, 0, 3], [-1, 2, 1], [-1, 1, 0], [-2, 0, 1], [0, -1, 1]] {
            let err = JointHierarchy::from_parent_indices(&["a", "b", "c"], &parents, &offsets)
                .unwrap_err();
            assert!(
                matches!(err, RigError::InvalidTopology(_)),
                "parents {parents:?} accepted"
            );
        }
    }

    #[test]
    fn rejects_duplicate_names_and_length_mismatch() {
        let err =
            JointHierarchy::from_parent_indices(&["a", "a"], &[-1, 0], &[Vec3::ZERO; 2]).unwrap_err();
        assert!(matches!(err, RigError::InvalidTopology(_)));

        let err =
            JointHierarchy::from_parent_indices(&["a", "b"], &[-1], &[Vec3::ZERO; 2]).unwrap_err();
        assert!(matches!(err, RigError::InvalidTopology(_)));
    }
}
