//! Forward kinematics module
//!
//! Decodes per-joint local rotations and composes them down the joint
//! hierarchy into world-space transforms.

pub mod forward;
pub mod pose;
pub mod rotation;

pub use forward::{ForwardKinematics, GlobalTransforms};
pub use pose::PoseBatch;
pub use rotation::{decode_euler, decode_six_d, RotationEncoding, RotationError};
