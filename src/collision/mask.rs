use glam::Vec3;

use super::sdf::SignedDistance;
use crate::error::{Result, RigError};
use crate::mesh::{self, Mesh};
use crate::skinning::SkinningWeights;

pub const UNASSIGNED: i32 = 0;
pub const EXCLUDED: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKind {
    /// Connected-component ids, `>= 1`.
    Component,
    /// 1 for confidently outward vertices, 0 otherwise.
    Surface,
}

/// Per-vertex classification tag. `-1` always means excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexMask {
    kind: MaskKind,
    values: Vec<i32>,
}

impl VertexMask {
    pub fn from_values(kind: MaskKind, values: Vec<i32>) -> Self {
        Self { kind, values }
    }

    pub fn components(mesh: &Mesh) -> Self {
        Self {
            kind: MaskKind::Component,
            values: mesh::connected_components(mesh),
        }
    }

    /// 1 where the oracle's distance is strictly above `threshold`.
    pub fn surface(oracle: &dyn SignedDistance, vertices: &[Vec3], threshold: f32) -> Self {
        Self::from_distances(&oracle.signed_distances(vertices), threshold)
    }

    /// Same as [`VertexMask::surface`] for distances sampled elsewhere.
    pub fn from_distances(distances: &[f32], threshold: f32) -> Self {
        Self {
            kind: MaskKind::Surface,
            values: distances
                .iter()
                .map(|&d| if d > threshold { 1 } else { UNASSIGNED })
                .collect(),
        }
    }

    /// Marks every vertex with any weight on an extremity joint as excluded.
    /// Returns how many vertices were marked.
    pub fn override_extremities<S: AsRef<str>>(
        &mut self,
        weights: &SkinningWeights,
        patterns: &[S],
    ) -> Result<usize> {
        if weights.vertex_count() != self.len() {
            return Err(RigError::InvalidWeights(format!(
                "{} weight rows for a mask of {} vertices",
                weights.vertex_count(),
                self.len()
            )));
        }

        let extremity_weight =
            weights.weight_on(|label| patterns.iter().any(|p| label.contains(p.as_ref())));

        let mut marked = 0;
        for (value, w) in self.values.iter_mut().zip(extremity_weight) {
            if w > 0.0 {
                *value = EXCLUDED;
                marked += 1;
            }
        }
        Ok(marked)
    }

    pub fn kind(&self) -> MaskKind {
        self.kind
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, vertex: usize) -> Option<i32> {
        self.values.get(vertex).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::SphereField;

    #[test]
    fn surface_threshold_is_strict() {
        let mask = VertexMask::from_distances(&[-0.5, -0.1, -0.05, 0.3], -0.1);
        assert_eq!(mask.kind(), MaskKind::Surface);
        assert_eq!(mask.values(), &[0, 0, 1, 1]);
    }

    #[test]
    fn surface_from_oracle() {
        let sphere = SphereField::new(Vec3::ZERO, 1.0);
        let mask = VertexMask::surface(
            &sphere,
            &[Vec3::ZERO, Vec3::new(0.95, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)],
            -0.1,
        );
        assert_eq!(mask.values(), &[0, 1, 1]);
    }

    #[test]
    fn hand_weight_forces_exclusion() {
        let weights = SkinningWeights::from_rows(
            vec!["Spine", "LeftHand", "lefthand_helper"],
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.99, 0.01, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
        )
        .unwrap();

        let mut mask = VertexMask::from_distances(&[1.0, 1.0, 1.0], -0.1);
        let marked = mask
            .override_extremities(&weights, &["Arm", "Leg", "Hand", "Foot"])
            .unwrap();

        assert_eq!(marked, 1);
        assert_eq!(mask.values(), &[1, -1, 1]);
    }

    #[test]
    fn override_ignores_distance() {
        let weights =
            SkinningWeights::from_rows(vec!["LeftHand"], vec![vec![1.0], vec![0.0]]).unwrap();
        let mut mask = VertexMask::from_distances(&[-5.0, -5.0], -0.1);
        mask.override_extremities(&weights, &["Hand"]).unwrap();
        assert_eq!(mask.values(), &[-1, 0]);
    }

    #[test]
    fn override_rejects_row_count_mismatch() {
        let weights =
            SkinningWeights::from_rows(vec!["LeftHand"], vec![vec![1.0], vec![1.0]]).unwrap();
        let mut mask = VertexMask::from_distances(&[1.0; 4], -0.1);

        let err = mask.override_extremities(&weights, &["Hand"]).unwrap_err();
        assert!(matches!(err, RigError::InvalidWeights(_)));
        assert_eq!(mask.values(), &[1, 1, 1, 1]);
    }
}
