use rayon::prelude::*;

use super::mask::{VertexMask, EXCLUDED, UNASSIGNED};
use super::pairs::{CollisionPair, CollisionPairBuffer};
use super::sdf::SignedDistance;
use crate::config::FilterConfig;
use crate::error::{Result, RigError};
use crate::mesh::Mesh;
use crate::skinning::SkinningWeights;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Active pairs seen by the rule.
    pub examined: usize,
    /// Pairs the rule turned into sentinels.
    pub discarded: usize,
}

impl FilterReport {
    pub fn kept(&self) -> usize {
        self.examined - self.discarded
    }
}

/// Prunes self-collision candidates that come from skinning rather than from
/// real contact. Every rule only ever writes the sentinel, so rules can be
/// chained in any order.
#[derive(Debug, Clone, Default)]
pub struct CollisionMaskFilter {
    config: FilterConfig,
}

impl CollisionMaskFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Keeps a pair when its six vertices include an excluded vertex but no
    /// unassigned one, or when each face lies entirely in one positive
    /// component and those components differ. Discards it otherwise.
    pub fn apply_component_rule(
        &self,
        buffer: &mut CollisionPairBuffer,
        mesh: &Mesh,
        mask: &VertexMask,
    ) -> Result<FilterReport> {
        if mask.len() != mesh.vertex_count() {
            return Err(RigError::ShapeMismatch {
                expected: mesh.vertex_count(),
                found: mask.len(),
            });
        }
        validate_faces(buffer, mesh)?;

        let values = mask.values();
        let report = prune(buffer, |pair| {
            let receiver = face_values(mesh, values, pair.receiver);
            let intruder = face_values(mesh, values, pair.intruder);
            !keep_by_component(&receiver, &intruder)
        });

        log::debug!(
            "component rule ({:?} mask): discarded {} of {} pairs",
            mask.kind(),
            report.discarded,
            report.examined
        );
        Ok(report)
    }

    /// Discards a pair when the dot product of the two faces' summed weight
    /// rows exceeds the correlation threshold.
    pub fn apply_weight_rule(
        &self,
        buffer: &mut CollisionPairBuffer,
        mesh: &Mesh,
        weights: &SkinningWeights,
    ) -> Result<FilterReport> {
        if weights.vertex_count() != mesh.vertex_count() {
            return Err(RigError::InvalidWeights(format!(
                "{} weight rows for a mesh of {} vertices",
                weights.vertex_count(),
                mesh.vertex_count()
            )));
        }
        validate_faces(buffer, mesh)?;

        let threshold = self.config.correlation_threshold;
        let report = prune(buffer, |pair| {
            let receiver = weights.summed_rows(&face(mesh, pair.receiver));
            let intruder = weights.summed_rows(&face(mesh, pair.intruder));
            let correlation: f32 = receiver.iter().zip(&intruder).map(|(a, b)| a * b).sum();
            correlation > threshold
        });

        log::debug!(
            "weight rule (threshold {threshold}): discarded {} of {} pairs",
            report.discarded,
            report.examined
        );
        Ok(report)
    }

    /// Classifies vertices against `oracle` with the configured distance
    /// threshold, then excludes extremity-weighted vertices.
    pub fn surface_mask(
        &self,
        oracle: &dyn SignedDistance,
        mesh: &Mesh,
        weights: &SkinningWeights,
    ) -> Result<VertexMask> {
        if weights.vertex_count() != mesh.vertex_count() {
            return Err(RigError::InvalidWeights(format!(
                "{} weight rows for a mesh of {} vertices",
                weights.vertex_count(),
                mesh.vertex_count()
            )));
        }

        let mut mask = VertexMask::surface(oracle, mesh.vertices(), self.config.distance_threshold);
        let marked = mask.override_extremities(weights, &self.config.extremity_patterns)?;
        log::debug!("surface mask: {marked} extremity vertices excluded");
        Ok(mask)
    }
}

fn keep_by_component(receiver: &[i32; 3], intruder: &[i32; 3]) -> bool {
    let all = || receiver.iter().chain(intruder);
    if all().any(|&v| v == EXCLUDED) && !all().any(|&v| v == UNASSIGNED) {
        return true;
    }

    match (single_component(receiver), single_component(intruder)) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}

fn single_component(values: &[i32; 3]) -> Option<i32> {
    let first = values[0];
    (first > 0 && values.iter().all(|&v| v == first)).then_some(first)
}

fn face(mesh: &Mesh, index: i32) -> [u32; 3] {
    mesh.faces()[index as usize]
}

fn face_values(mesh: &Mesh, values: &[i32], index: i32) -> [i32; 3] {
    face(mesh, index).map(|v| values[v as usize])
}

fn validate_faces(buffer: &CollisionPairBuffer, mesh: &Mesh) -> Result<()> {
    let face_count = mesh.face_count();
    for (i, pair) in buffer.pairs().iter().enumerate() {
        if !pair.is_active() {
            continue;
        }
        for index in [pair.receiver, pair.intruder] {
            if index as usize >= face_count {
                return Err(RigError::PairIndexOutOfRange {
                    slot: i,
                    face: index,
                    face_count,
                });
            }
        }
    }
    Ok(())
}

/// Runs `discard` on every active pair in parallel and writes the sentinel
/// where it returns true.
fn prune<F>(buffer: &mut CollisionPairBuffer, discard: F) -> FilterReport
where
    F: Fn(&CollisionPair) -> bool + Sync,
{
    let (examined, discarded) = buffer
        .pairs_mut()
        .par_iter_mut()
        .filter(|pair| pair.is_active())
        .map(|pair| {
            if discard(pair) {
                pair.discard();
                (1, 1)
            } else {
                (1, 0)
            }
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    FilterReport {
        examined,
        discarded,
    }
}
