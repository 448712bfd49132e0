use std::io::Write;

use glam::Vec3;

use crate::error::Result;
use crate::kinematics::PoseBatch;
use crate::math::axis_angle;

const ZERO_ANGLE: f32 = 1e-9;

/// Writes the local joint rotations of `pose` as per-frame axis-angle blocks.
///
/// Layout: `N J`, a rest block of `J` lines `1 0 0` followed by `J` zero
/// angles, then for every frame its 1-based number, `J` axis lines and one
/// line of `J` angles in radians.
pub fn write_anim<W: Write>(out: &mut W, pose: &PoseBatch) -> Result<()> {
    let frames = pose.frame_count();
    let joints = pose.joint_count();

    // decode everything first so a bad rotation leaves `out` untouched
    let mut rotations = Vec::with_capacity(frames * joints);
    for frame in 0..frames {
        for joint in 0..joints {
            let (axis, angle) = axis_angle(pose.rotation(frame, joint)?);
            if angle <= ZERO_ANGLE {
                rotations.push((Vec3::X, 0.0));
            } else {
                rotations.push((axis, angle));
            }
        }
    }

    writeln!(out, "{} {}", frames, joints)?;
    for _ in 0..joints {
        writeln!(out, "1 0 0")?;
    }
    writeln!(out, "{}", vec!["0"; joints].join(" "))?;

    for frame in 0..frames {
        let block = &rotations[frame * joints..(frame + 1) * joints];
        writeln!(out, "{}", frame + 1)?;
        for (axis, _) in block {
            writeln!(out, "{:.10} {:.10} {:.10}", axis.x, axis.y, axis.z)?;
        }
        let angles: Vec<String> = block.iter().map(|(_, a)| a.to_string()).collect();
        writeln!(out, "{}", angles.join(" "))?;
    }
    Ok(())
}
