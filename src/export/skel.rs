use std::io::Write;

use glam::Vec3;

use crate::error::{Result, RigError};
use crate::rig::JointHierarchy;

/// Writes one line per joint: position, name and parent name (`root` when
/// the joint has none). `positions` are usually rest-pose world positions.
pub fn write_skel<W: Write>(
    out: &mut W,
    hierarchy: &JointHierarchy,
    positions: &[Vec3],
) -> Result<()> {
    if positions.len() != hierarchy.joint_count() {
        return Err(RigError::ShapeMismatch {
            expected: hierarchy.joint_count(),
            found: positions.len(),
        });
    }

    writeln!(out, "{}", hierarchy.joint_count())?;
    for (joint, p) in hierarchy.joints().iter().zip(positions) {
        let parent = joint
            .parent
            .and_then(|i| hierarchy.name(i))
            .unwrap_or("root");
        writeln!(out, "{} {} {} {} {}", p.x, p.y, p.z, joint.name, parent)?;
    }
    Ok(())
}
