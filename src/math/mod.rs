//! Math utilities module
//!
//! Re-exports the glam types used across the crate plus helpers for
//! homogeneous rigid transforms.

mod transform;

pub use transform::{
    axis_angle, is_invertible, rigid, rotation_block, translation, without_translation,
};

// Re-export commonly used glam types
pub use glam::{Mat3, Mat4, Quat, Vec3, Vec4};
